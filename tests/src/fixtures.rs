//! # Shared Fixtures
//!
//! Well-known accounts and pre-funded services.

use std::sync::Arc;
use token_ledger::prelude::*;

/// Service type produced by [`create_test_service`].
pub type TestService = TokenService<Arc<StaticAuthorizer>, Arc<InMemoryEventLog>>;

/// Governance holder (receives the initial supply).
pub const GOV: Address = TEST_ROLES.governance;
/// Oracle holder.
pub const ORACLE: Address = TEST_ROLES.oracle;
/// RBS holder.
pub const RBS: Address = TEST_ROLES.rbs;
/// Treasury holder.
pub const TREASURY: Address = TEST_ROLES.treasury;
/// Authorization collaborator address.
pub const MULTISIG: Address = TEST_ROLES.authorization_collaborator;

/// Ordinary account.
pub const ALICE: Address = Address::repeat_byte(0xa1);
/// Ordinary account.
pub const BOB: Address = Address::repeat_byte(0xb0);
/// Ordinary account.
pub const CAROL: Address = Address::repeat_byte(0xc4);
/// Adversary.
pub const MALLORY: Address = Address::repeat_byte(0xee);

/// Test service where each `(account, amount)` was paid from governance.
///
/// Governance is whitelisted, so funding is untaxed. The log is drained.
pub fn funded_service(accounts: &[(Address, u64)]) -> TestService {
    let service = create_test_service();
    for (account, amount) in accounts {
        service
            .transfer(GOV, *account, U256::from(*amount))
            .expect("governance holds the initial supply");
    }
    service.sink().drain();
    service
}

/// Test service where each `(account, amount)` was minted by the oracle.
///
/// Use this when the funding exceeds the genesis supply. Governance keeps its
/// full initial balance. The log is drained.
pub fn minted_service(accounts: &[(Address, u64)]) -> TestService {
    let service = create_test_service();
    for (account, amount) in accounts {
        service
            .mint(ORACLE, *account, U256::from(*amount))
            .expect("oracle may mint");
    }
    service.sink().drain();
    service
}

/// Balances of `accounts` in order.
pub fn balances(service: &TestService, accounts: &[Address]) -> Vec<U256> {
    accounts.iter().map(|a| service.balance_of(*a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funded_service_draws_from_governance() {
        let service = funded_service(&[(ALICE, 400_000), (BOB, 600_000)]);
        assert_eq!(service.balance_of(GOV), U256::zero());
        assert_eq!(service.total_supply(), U256::from(1_000_000));
        assert!(service.sink().is_empty());
    }

    #[test]
    fn test_minted_service_funds_beyond_genesis_supply() {
        let service = minted_service(&[(ALICE, 1_000_000_000), (BOB, 10_000_000)]);
        assert_eq!(
            balances(&service, &[GOV, ALICE, BOB]),
            vec![
                U256::from(1_000_000),
                U256::from(1_000_000_000),
                U256::from(10_000_000)
            ]
        );
        assert_eq!(service.total_supply(), U256::from(1_011_000_000u64));
        assert!(service.check_invariants().is_valid());
        assert!(service.sink().is_empty());
    }
}
