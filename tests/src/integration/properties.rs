//! # Ledger Properties
//!
//! Randomized checks over long operation sequences:
//!
//! - **Conservation**: sum of balances equals total supply after every call
//! - **Tax correctness**: treasury receives exactly `floor(A * rate / 10000)`
//! - **Whitelist override**: whitelisted parties never pay tax
//! - **Failure atomicity**: a rejected call changes nothing observable
//! - **Idempotent reads**: reads without mutation repeat exactly

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use token_ledger::prelude::*;

    const ACCOUNTS: [Address; 8] = [GOV, ORACLE, RBS, TREASURY, ALICE, BOB, CAROL, MALLORY];

    fn sum_of_balances(service: &TestService) -> U256 {
        ACCOUNTS
            .iter()
            .fold(U256::zero(), |acc, a| acc + service.balance_of(*a))
    }

    fn pick(rng: &mut StdRng) -> Address {
        ACCOUNTS[rng.gen_range(0..ACCOUNTS.len())]
    }

    /// Applies one random operation. Failures are expected and ignored.
    fn random_step(service: &TestService, rng: &mut StdRng) {
        let amount = U256::from(rng.gen_range(0u64..5_000));
        match rng.gen_range(0..8) {
            0 | 1 | 2 => {
                let _ = service.transfer(pick(rng), pick(rng), amount);
            }
            3 => {
                let _ = service.approve(pick(rng), pick(rng), amount);
            }
            4 => {
                let _ = service.transfer_from(pick(rng), pick(rng), pick(rng), amount);
            }
            5 => {
                let list = GovernanceList::from_is_long(rng.gen_bool(0.5));
                let _ = service.update_governance_list(GOV, pick(rng), list, rng.gen_bool(0.7));
            }
            6 => {
                let minter = if rng.gen_bool(0.5) { ORACLE } else { MALLORY };
                let _ = service.mint(minter, pick(rng), amount);
            }
            _ => {
                let _ = service.update_whitelist(GOV, pick(rng), rng.gen_bool(0.3));
            }
        }
    }

    #[test]
    fn test_conservation_under_random_sequences() {
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let service = funded_service(&[(ALICE, 50_000), (BOB, 50_000), (CAROL, 50_000)]);

            for step in 0..400 {
                random_step(&service, &mut rng);
                assert_eq!(
                    sum_of_balances(&service),
                    service.total_supply(),
                    "seed {seed} step {step}"
                );
            }
            assert!(service.check_invariants().is_valid(), "seed {seed}");
        }
    }

    #[test]
    fn test_buy_tax_matches_floor_formula() {
        let mut rng = StdRng::seed_from_u64(7);
        let service = minted_service(&[(ALICE, 1_000_000_000)]);
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();

        for _ in 0..200 {
            let amount: u64 = rng.gen_range(1..1_000_000);
            let treasury_before = service.balance_of(TREASURY);
            let bob_before = service.balance_of(BOB);

            service.transfer(ALICE, BOB, U256::from(amount)).unwrap();

            let expected_tax = amount * 500 / 10_000;
            assert_eq!(
                service.balance_of(TREASURY) - treasury_before,
                U256::from(expected_tax)
            );
            assert_eq!(
                service.balance_of(BOB) - bob_before,
                U256::from(amount - expected_tax)
            );
        }
    }

    #[test]
    fn test_whitelisted_party_never_pays_tax() {
        let mut rng = StdRng::seed_from_u64(11);
        let service = minted_service(&[(ALICE, 10_000_000), (BOB, 10_000_000)]);
        service.update_whitelist(GOV, ALICE, true).unwrap();

        for _ in 0..100 {
            // Shuffle list memberships of both parties
            for account in [ALICE, BOB] {
                for list in [GovernanceList::Long, GovernanceList::Short] {
                    service
                        .update_governance_list(GOV, account, list, rng.gen_bool(0.5))
                        .unwrap();
                }
            }
            let amount = U256::from(rng.gen_range(1u64..10_000));
            let (from, to) = if rng.gen_bool(0.5) { (ALICE, BOB) } else { (BOB, ALICE) };

            let receipt = service.transfer(from, to, amount).unwrap();
            assert_eq!(receipt.plan.quote.decision, TaxDecision::Exempt);
        }
        assert_eq!(service.balance_of(TREASURY), U256::zero());
    }

    #[test]
    fn test_rejected_calls_leave_state_unchanged() {
        let mut rng = StdRng::seed_from_u64(23);
        let service = funded_service(&[(ALICE, 1_000)]);
        service.approve(ALICE, BOB, U256::from(300)).unwrap();

        for _ in 0..100 {
            let before = balances(&service, &ACCOUNTS);
            let allowance_before = service.allowance(ALICE, BOB);
            let supply_before = service.total_supply();

            let over = U256::from(rng.gen_range(1_001u64..1_000_000));
            assert!(service.transfer(ALICE, CAROL, over).is_err());
            assert!(service.transfer_from(BOB, ALICE, CAROL, over).is_err());
            assert!(service.mint(MALLORY, MALLORY, over).is_err());
            assert!(service.set_tax_rates(GOV, BasisPoints::new(10_001), BasisPoints::ZERO).is_err());

            assert_eq!(balances(&service, &ACCOUNTS), before);
            assert_eq!(service.allowance(ALICE, BOB), allowance_before);
            assert_eq!(service.total_supply(), supply_before);
        }
    }

    #[test]
    fn test_reads_are_idempotent() {
        let service = funded_service(&[(ALICE, 1_234)]);
        service.approve(ALICE, BOB, U256::from(99)).unwrap();

        let first = (
            service.balance_of(ALICE),
            service.allowance(ALICE, BOB),
            service.buy_tax(),
            service.sell_tax(),
            service.quote_tax(ALICE, BOB, U256::from(1_000)),
        );
        let events_before = service.sink().len();
        for _ in 0..10 {
            let again = (
                service.balance_of(ALICE),
                service.allowance(ALICE, BOB),
                service.buy_tax(),
                service.sell_tax(),
                service.quote_tax(ALICE, BOB, U256::from(1_000)),
            );
            assert_eq!(again, first);
        }
        assert_eq!(service.sink().len(), events_before);
    }

    #[test]
    fn test_stats_track_tax_collected() {
        let mut rng = StdRng::seed_from_u64(31);
        let service = minted_service(&[(ALICE, 10_000_000)]);
        service
            .update_governance_list(GOV, BOB, GovernanceList::Long, true)
            .unwrap();

        for _ in 0..50 {
            let amount = U256::from(rng.gen_range(1u64..100_000));
            service.transfer(ALICE, BOB, amount).unwrap();
        }
        assert_eq!(service.stats().tax_collected, service.balance_of(TREASURY));
    }
}
