//! # Ledger Flows
//!
//! End-to-end behaviour through `TokenApi`, `TokenQuery` and `AdminApi`:
//!
//! 1. **Genesis**: supply minted to governance, role holders whitelisted
//! 2. **Taxed transfers**: buy, sell, exempt and untaxed paths
//! 3. **Delegated transfers**: allowance consumption and the unlimited sentinel
//! 4. **Governance**: role rotation, quorum authorization, rate changes
//! 5. **Audit trail**: change records and their JSON form

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use std::sync::Arc;
    use token_ledger::prelude::*;

    // =============================================================================
    // GENESIS
    // =============================================================================

    #[test]
    fn test_genesis_scenario() {
        let service = create_test_service();

        assert_eq!(service.balance_of(GOV), U256::from(1_000_000));
        assert_eq!(service.total_supply(), U256::from(1_000_000));
        assert!(service.is_whitelisted(GOV));
        assert!(service.is_whitelisted(TREASURY));
        assert!(service.is_whitelisted(ORACLE));
        assert!(service.is_whitelisted(RBS));
        assert!(!service.is_whitelisted(ALICE));
        assert_eq!(service.symbol(), "TAX");
        assert_eq!(service.authorization_collaborator(), MULTISIG);
    }

    #[test]
    fn test_genesis_with_extra_whitelist() {
        let mut config = TokenConfig::with_roles(TEST_ROLES);
        config.extra_whitelist = vec![CAROL];
        config.initial_supply = U256::zero();

        let service = TokenService::new(config, StaticAuthorizer::new(), NoOpEventSink).unwrap();
        assert!(service.is_whitelisted(CAROL));
        assert_eq!(service.total_supply(), U256::zero());
    }

    #[test]
    fn test_governance_pays_unclassified_user_scenario() {
        let service = create_test_service();
        service.transfer(GOV, ALICE, U256::from(1_000)).unwrap();

        assert_eq!(service.balance_of(ALICE), U256::from(1_000));
        assert_eq!(service.balance_of(GOV), U256::from(999_000));
        assert_eq!(service.balance_of(TREASURY), U256::zero());
    }

    // =============================================================================
    // TAXED TRANSFERS
    // =============================================================================

    #[test]
    fn test_buy_tax_floor() {
        let service = funded_service(&[(ALICE, 100_000)]);
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();

        // 5% of 12_345 = 617.25, floored
        service.transfer(ALICE, BOB, U256::from(12_345)).unwrap();
        assert_eq!(service.balance_of(TREASURY), U256::from(617));
        assert_eq!(service.balance_of(BOB), U256::from(12_345 - 617));
    }

    #[test]
    fn test_sell_tax_on_short_sender() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Short, true)
            .unwrap();

        let receipt = service.transfer(ALICE, BOB, U256::from(1_000)).unwrap();
        assert_eq!(receipt.plan.quote.decision, TaxDecision::Sell);
        assert_eq!(service.balance_of(TREASURY), U256::from(100));
    }

    #[test]
    fn test_dual_list_sender_pays_buy_rate() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Short, true)
            .unwrap();

        let receipt = service.transfer(ALICE, BOB, U256::from(1_000)).unwrap();
        assert_eq!(receipt.plan.quote.decision, TaxDecision::Buy);
        assert_eq!(receipt.plan.quote.rate, BasisPoints::new(500));
        assert_eq!(service.balance_of(TREASURY), U256::from(50));
    }

    #[test]
    fn test_exempt_and_untaxed_are_distinct() {
        let service = funded_service(&[(ALICE, 10_000), (CAROL, 10_000)]);
        service.update_whitelist(GOV, CAROL, true).unwrap();

        let untaxed = service.transfer(ALICE, BOB, U256::from(10)).unwrap();
        let exempt = service.transfer(CAROL, BOB, U256::from(10)).unwrap();

        assert_eq!(untaxed.plan.quote.decision, TaxDecision::Untaxed);
        assert_eq!(exempt.plan.quote.decision, TaxDecision::Exempt);
        assert_eq!(untaxed.plan.quote.tax_amount, exempt.plan.quote.tax_amount);

        let decisions: Vec<TaxDecision> = service
            .sink()
            .of_kind("tax_applied")
            .into_iter()
            .filter_map(|event| match event {
                TokenEvent::TaxApplied { decision, .. } => Some(decision),
                _ => None,
            })
            .collect();
        assert_eq!(decisions, vec![TaxDecision::Untaxed, TaxDecision::Exempt]);
    }

    #[test]
    fn test_treasury_rotation_redirects_tax() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service
            .update_governance_list(GOV, BOB, GovernanceList::Long, true)
            .unwrap();
        service.set_treasury(GOV, CAROL).unwrap();

        service.transfer(ALICE, BOB, U256::from(1_000)).unwrap();
        assert_eq!(service.balance_of(CAROL), U256::from(100));
        assert_eq!(service.balance_of(TREASURY), U256::zero());
    }

    #[test]
    fn test_full_rate_sends_everything_to_treasury() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service
            .set_tax_rates(GOV, BasisPoints::MAX, BasisPoints::ZERO)
            .unwrap();
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();

        service.transfer(ALICE, BOB, U256::from(1_000)).unwrap();
        assert_eq!(service.balance_of(BOB), U256::zero());
        assert_eq!(service.balance_of(TREASURY), U256::from(1_000));
    }

    #[test]
    fn test_tax_on_maximum_supply_does_not_overflow() {
        let mut config = TokenConfig::with_roles(TEST_ROLES);
        config.initial_supply = U256::MAX;
        let service = TokenService::new(
            config,
            StaticAuthorizer::with_confirmed(MULTISIG, [GOV]),
            NoOpEventSink,
        )
        .unwrap();
        service.transfer(GOV, ALICE, U256::MAX).unwrap();
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();

        let quote = service.quote_tax(ALICE, BOB, U256::MAX).unwrap();
        assert_eq!(quote.tax_amount + quote.net_amount, U256::MAX);
        assert_eq!(quote.tax_amount, U256::MAX / 20);

        service.transfer(ALICE, BOB, U256::MAX).unwrap();
        assert_eq!(service.balance_of(TREASURY), quote.tax_amount);
        assert!(service.check_invariants().is_valid());
    }

    // =============================================================================
    // DELEGATED TRANSFERS
    // =============================================================================

    #[test]
    fn test_delegated_taxed_transfer() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Long, true)
            .unwrap();
        service.approve(ALICE, CAROL, U256::from(2_000)).unwrap();

        // Allowance covers the gross amount, tax included
        let receipt = service
            .transfer_from(CAROL, ALICE, BOB, U256::from(2_000))
            .unwrap();
        assert_eq!(receipt.remaining_allowance, Some(U256::zero()));
        assert_eq!(service.balance_of(BOB), U256::from(1_900));
        assert_eq!(service.balance_of(TREASURY), U256::from(100));
        assert_eq!(service.balance_of(ALICE), U256::from(8_000));
    }

    #[test]
    fn test_unlimited_allowance_survives_many_spends() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service.approve(ALICE, CAROL, U256::MAX).unwrap();
        for _ in 0..5 {
            service
                .transfer_from(CAROL, ALICE, BOB, U256::from(100))
                .unwrap();
        }
        assert_eq!(service.allowance(ALICE, CAROL), U256::MAX);
        assert_eq!(service.balance_of(BOB), U256::from(500));
    }

    #[test]
    fn test_decrease_below_zero_fails() {
        let service = funded_service(&[]);
        service.approve(ALICE, BOB, U256::from(10)).unwrap();
        assert_eq!(
            service.decrease_allowance(ALICE, BOB, U256::from(11)),
            Err(TokenError::InsufficientAllowance {
                required: U256::from(11),
                available: U256::from(10),
            })
        );
        assert_eq!(service.allowance(ALICE, BOB), U256::from(10));
    }

    // =============================================================================
    // GOVERNANCE
    // =============================================================================

    #[test]
    fn test_quorum_authorized_governance() {
        let signers = [0x71, 0x72, 0x73].map(Address::repeat_byte);
        let quorum = Arc::new(QuorumAuthorizer::new());
        quorum.register(MULTISIG, signers, 2).unwrap();

        let service = TokenService::new(
            TokenConfig::with_roles(TEST_ROLES),
            quorum.clone(),
            InMemoryEventLog::new(),
        )
        .unwrap();

        quorum.approve(MULTISIG, signers[0], GOV).unwrap();
        assert_eq!(
            service.pause(GOV),
            Err(TokenError::NotAuthorized { caller: GOV })
        );

        quorum.approve(MULTISIG, signers[1], GOV).unwrap();
        service.pause(GOV).unwrap();
        assert!(service.is_paused());
    }

    #[test]
    fn test_rotated_oracle_mints_and_old_one_cannot() {
        let service = create_test_service();
        service.set_oracle(GOV, CAROL).unwrap();

        assert_eq!(
            service.mint(ORACLE, ALICE, U256::one()),
            Err(TokenError::NotAuthorized { caller: ORACLE })
        );
        service.mint(CAROL, ALICE, U256::from(42)).unwrap();
        assert_eq!(service.balance_of(ALICE), U256::from(42));
        assert_eq!(service.stats().minted, U256::from(1_000_042));
    }

    #[test]
    fn test_zero_mint_is_recorded() {
        let service = create_test_service();
        service.mint(RBS, ALICE, U256::zero()).unwrap();
        assert_eq!(service.total_supply(), U256::from(1_000_000));
        assert_eq!(service.sink().len(), 1);
    }

    #[test]
    fn test_governance_list_membership_round_trip() {
        let service = create_test_service();
        service
            .update_governance_list(GOV, ALICE, GovernanceList::Short, true)
            .unwrap();
        assert!(service.is_governance_listed(ALICE, GovernanceList::Short));
        assert!(!service.is_governance_listed(ALICE, GovernanceList::Long));

        service
            .update_governance_list(GOV, ALICE, GovernanceList::Short, false)
            .unwrap();
        assert!(!service.is_governance_listed(ALICE, GovernanceList::Short));

        let events = service.sink().of_kind("governance_list_updated");
        assert_eq!(
            events.last(),
            Some(&TokenEvent::GovernanceListUpdated {
                account: ALICE,
                list: GovernanceList::Short,
                old: true,
                new: false,
            })
        );
    }

    // =============================================================================
    // AUDIT TRAIL
    // =============================================================================

    #[test]
    fn test_records_serialize_with_kind_tag() {
        let service = funded_service(&[(ALICE, 10_000)]);
        service.approve(ALICE, BOB, U256::from(7)).unwrap();

        let events = service.sink().drain();
        assert_eq!(events.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&events[0].to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "approval");
        assert_eq!(events[0].affected_addresses(), vec![ALICE, BOB]);
    }

    #[test]
    fn test_failed_calls_emit_nothing() {
        let service = funded_service(&[(ALICE, 100)]);
        let _ = service.transfer(ALICE, BOB, U256::from(101));
        let _ = service.set_treasury(MALLORY, MALLORY);
        let _ = service.approve(ALICE, Address::ZERO, U256::one());
        assert!(service.sink().is_empty());
        assert_eq!(service.stats().rejected_calls, 3);
    }
}
