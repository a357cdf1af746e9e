use church_state_sim::model::*;
use church_state_sim::sim::step::LIBERAL_THRESHOLD;
use church_state_sim::sim::{Simulator, run};
use church_state_sim::testutil::assert_invariants;
use proptest::prelude::*;

prop_compose! {
    fn arb_params()(
        pop in 1_u64..50_000,
        split in (0.0_f64..=1.0, 0.0_f64..=1.0),
        church_influence in 0.0_f64..=1.0,
        state_capacity in 0.0_f64..=1.0,
        economic_prod_per_person in 0.0_f64..5.0,
        external_sanction_severity in 0.0_f64..=1.0,
        effects in prop::array::uniform7(0.0_f64..=1.0),
        rates in (0.0_f64..=0.1, 0.0_f64..=1.0),
        shock in (0.0_f64..=1.0, 0.0_f64..=1.0),
        timesteps in 0_u32..60,
    ) -> Params {
        let (x, y) = split;
        let (birth_rate, death_rate) = rates;
        let (shock_prob, shock_strength) = shock;
        Params {
            pop,
            init_m: x,
            init_l: (1.0 - x) * y,
            init_u: (1.0 - x) * (1.0 - y),
            church_influence,
            state_capacity,
            economic_prod_per_person,
            external_sanction_severity,
            propaganda_effect: effects[0],
            church_mission_effect: effects[1],
            repression_base: effects[2],
            repression_effect_on_l: effects[3],
            repression_legitimacy_cost: effects[4],
            military_maintenance_cost: effects[5],
            conversion_from_economic_pain: effects[6],
            birth_rate,
            death_rate,
            shock_prob,
            shock_strength,
            timesteps,
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_valid_params(params in arb_params(), seed in any::<u64>()) {
        let history = run(params.clone(), seed).unwrap();
        prop_assert_eq!(history.len(), params.timesteps as usize);
        assert_invariants(&history, params.pop);
    }

    #[test]
    fn repression_moves_with_liberal_share(params in arb_params(), seed in any::<u64>()) {
        let mut sim = Simulator::new(params, seed).unwrap();
        let mut previous = sim.state().repression;
        while let Some((record, events)) = sim.advance() {
            if events.liberal_fraction > LIBERAL_THRESHOLD {
                prop_assert!(record.repression >= previous);
            } else {
                prop_assert!(record.repression <= previous);
            }
            previous = record.repression;
        }
    }

    #[test]
    fn runs_are_reproducible_per_seed(params in arb_params(), seed in any::<u64>()) {
        prop_assert_eq!(run(params.clone(), seed).unwrap(), run(params, seed).unwrap());
    }
}
