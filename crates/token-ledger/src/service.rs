//! # Token Service
//!
//! Implements the driving ports over a single owned [`TokenState`].
//!
//! ## Call Discipline
//!
//! Every mutating call runs under the state write lock from its first check
//! to its last write, so calls never interleave. Checks run in a fixed order:
//!
//! 1. Pause gate (`SystemPaused`)
//! 2. Access gate (`NotAuthorized`)
//! 3. Argument and balance checks
//!
//! Domain operations validate before they write, so a failing call leaves
//! the state untouched. Change records are handed to the [`EventSink`] after
//! the state is updated and before the lock is released; a sink failure is
//! logged and never rolls the call back.

use crate::access::AccessController;
#[cfg(any(test, feature = "test-utils"))]
use crate::adapters::{InMemoryEventLog, StaticAuthorizer};
#[cfg(any(test, feature = "test-utils"))]
use crate::config::RoleConfig;
use crate::config::TokenConfig;
use crate::domain::classification::GovernanceList;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::roles::{Role, RoleStore};
use crate::domain::state::{TokenMetadata, TokenState};
use crate::domain::tax::{TaxPolicy, TaxQuote};
use crate::domain::transfer::TransferReceipt;
use crate::domain::value_objects::{Address, BasisPoints, U256};
use crate::errors::{TokenError, TokenResult};
use crate::events::TokenEvent;
use crate::ports::inbound::{AdminApi, TokenApi, TokenQuery};
use crate::ports::outbound::{AuthorizationOracle, EventSink};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use token_telemetry::log_transfer_event;
#[cfg(any(test, feature = "test-utils"))]
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters accumulated since construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Completed transfers (direct and delegated).
    pub transfers: u64,
    /// Transfers that redirected a non-zero tax amount.
    pub taxed_transfers: u64,
    /// Calls that failed.
    pub rejected_calls: u64,
    /// Failed calls whose cause was `NotAuthorized`.
    pub authorization_denials: u64,
    /// Cumulative tax sent to the treasury.
    pub tax_collected: U256,
    /// Cumulative minted supply, genesis included.
    pub minted: U256,
}

impl ServiceStats {
    fn record(&mut self, events: &[TokenEvent]) {
        for event in events {
            match event {
                TokenEvent::TaxApplied { tax_amount, .. } => {
                    self.transfers += 1;
                    if !tax_amount.is_zero() {
                        self.taxed_transfers += 1;
                        self.tax_collected = self.tax_collected.saturating_add(*tax_amount);
                    }
                }
                TokenEvent::Transfer { from, amount, .. } if from.is_zero() => {
                    self.minted = self.minted.saturating_add(*amount);
                }
                _ => {}
            }
        }
    }

    fn record_rejection(&mut self, error: &TokenError) {
        self.rejected_calls += 1;
        if error.is_authorization_failure() {
            self.authorization_denials += 1;
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// The ledger.
///
/// Generic over its two driven ports. Pass an `Arc` to keep a handle on an
/// adapter after construction.
pub struct TokenService<A: AuthorizationOracle, E: EventSink> {
    state: RwLock<TokenState>,
    access: AccessController<A>,
    sink: E,
    stats: Mutex<ServiceStats>,
}

impl<A: AuthorizationOracle, E: EventSink> TokenService<A, E> {
    /// Builds the genesis state from `config`.
    ///
    /// Fails with `ZeroAddress` if any role is null, `InvalidTaxRate` if
    /// either rate exceeds 100% and `InvalidConfig` for an empty name or
    /// symbol.
    pub fn new(config: TokenConfig, authorizer: A, sink: E) -> TokenResult<Self> {
        config.validate()?;
        let roles = RoleStore::new(
            config.roles.governance,
            config.roles.oracle,
            config.roles.rbs,
            config.roles.treasury,
            config.roles.authorization_collaborator,
        )?;
        let tax = TaxPolicy::new(config.buy_tax, config.sell_tax)?;
        let metadata = TokenMetadata {
            name: config.name,
            symbol: config.symbol,
            decimals: config.decimals,
        };
        let state = TokenState::genesis(
            metadata,
            roles,
            tax,
            config.initial_supply,
            &config.extra_whitelist,
        )?;

        info!(
            name = %state.metadata.name,
            symbol = %state.metadata.symbol,
            initial_supply = %config.initial_supply,
            governance = ?roles.governance(),
            "Token ledger created"
        );

        let service = Self {
            state: RwLock::new(state),
            access: AccessController::new(authorizer),
            sink,
            stats: Mutex::new(ServiceStats::default()),
        };
        service.publish(
            "genesis",
            &[TokenEvent::Transfer {
                from: Address::ZERO,
                to: roles.governance(),
                amount: config.initial_supply,
            }],
        );
        Ok(service)
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    /// Runs every invariant check against the current state.
    #[must_use]
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.state.read())
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TokenState {
        self.state.read().clone()
    }

    /// The injected authorization port.
    pub fn authorizer(&self) -> &A {
        self.access.oracle()
    }

    /// The injected event sink.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    // =========================================================================
    // CALL EXECUTION
    // =========================================================================

    /// Runs `op` under the write lock and publishes its records on success.
    fn execute<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&mut TokenState) -> TokenResult<(T, Vec<TokenEvent>)>,
    ) -> TokenResult<T> {
        let mut state = self.state.write();
        match op(&mut state) {
            Ok((value, events)) => {
                debug_assert!(
                    check_all_invariants(&state).is_valid(),
                    "invariants violated after {operation}"
                );
                self.publish(operation, &events);
                Ok(value)
            }
            Err(e) => {
                debug!(operation, error = %e, "Call rejected");
                self.stats.lock().record_rejection(&e);
                #[cfg(feature = "metrics")]
                record_rejection_metrics(operation, &e);
                Err(e)
            }
        }
    }

    fn publish(&self, operation: &'static str, events: &[TokenEvent]) {
        if events.is_empty() {
            return;
        }
        self.stats.lock().record(events);
        #[cfg(feature = "metrics")]
        record_event_metrics(events);
        if let Err(e) = self.sink.publish(events) {
            error!(operation, error = %e, records = events.len(), "Event sink rejected change records");
        }
    }

    /// Shared body of the governance-gated role setters.
    fn set_role(&self, caller: Address, role: Role, holder: Address) -> TokenResult<()> {
        self.execute("set_role", |state| {
            state.pause.ensure_active()?;
            self.access.require_governance(&state.roles, caller)?;
            let old = state.roles.set(role, holder)?;
            info!(role = %role, old = ?old, new = ?holder, "Role updated");
            Ok((
                (),
                vec![TokenEvent::RoleUpdated {
                    role,
                    old,
                    new: holder,
                }],
            ))
        })
    }
}

/// Role holders used by [`create_test_service`].
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_ROLES: RoleConfig = RoleConfig {
    governance: Address::repeat_byte(0x01),
    oracle: Address::repeat_byte(0x02),
    rbs: Address::repeat_byte(0x03),
    treasury: Address::repeat_byte(0x04),
    authorization_collaborator: Address::repeat_byte(0x05),
};

/// Service with default parameters, [`TEST_ROLES`], governance confirmed by
/// a static authorizer and an in-memory event log.
///
/// The genesis record is already drained from the log.
#[cfg(any(test, feature = "test-utils"))]
#[must_use]
pub fn create_test_service() -> TokenService<Arc<StaticAuthorizer>, Arc<InMemoryEventLog>> {
    let auth = Arc::new(StaticAuthorizer::with_confirmed(
        TEST_ROLES.authorization_collaborator,
        [TEST_ROLES.governance],
    ));
    let log = Arc::new(InMemoryEventLog::new());
    let service = TokenService::new(TokenConfig::with_roles(TEST_ROLES), auth, log)
        .expect("test configuration is valid");
    service.sink().drain();
    service
}

fn transfer_events(receipt: &TransferReceipt) -> Vec<TokenEvent> {
    let plan = &receipt.plan;
    let mut events = Vec::with_capacity(plan.legs.len() + 1);
    events.push(TokenEvent::TaxApplied {
        from: plan.from,
        to: plan.to,
        decision: plan.quote.decision,
        rate: plan.quote.rate,
        tax_amount: plan.quote.tax_amount,
        recipient: plan.quote.recipient,
    });
    events.extend(plan.legs.iter().map(|leg| TokenEvent::Transfer {
        from: leg.from,
        to: leg.to,
        amount: leg.amount,
    }));
    events
}

// =============================================================================
// METRICS
// =============================================================================

#[cfg(feature = "metrics")]
fn saturating_u64(value: U256) -> u64 {
    if value.bits() <= 64 {
        value.low_u64()
    } else {
        u64::MAX
    }
}

#[cfg(feature = "metrics")]
fn record_event_metrics(events: &[TokenEvent]) {
    use token_telemetry::metrics as m;

    for event in events {
        match event {
            TokenEvent::TaxApplied {
                decision,
                tax_amount,
                ..
            } => {
                m::TRANSFERS_TOTAL
                    .with_label_values(&[decision.as_str()])
                    .inc();
                if !tax_amount.is_zero() {
                    m::TAXED_TRANSFERS.inc();
                    m::TAX_COLLECTED.inc_by(saturating_u64(*tax_amount));
                }
            }
            TokenEvent::Transfer { from, amount, .. } if from.is_zero() => {
                m::MINTED.inc_by(saturating_u64(*amount));
            }
            TokenEvent::Paused { .. } => {
                m::PAUSE_TOGGLES.with_label_values(&["paused"]).inc();
                m::PAUSED.set(1);
            }
            TokenEvent::Unpaused { .. } => {
                m::PAUSE_TOGGLES.with_label_values(&["active"]).inc();
                m::PAUSED.set(0);
            }
            _ => {}
        }
    }
}

#[cfg(feature = "metrics")]
fn record_rejection_metrics(operation: &'static str, error: &TokenError) {
    use token_telemetry::metrics as m;

    m::REJECTED_CALLS.with_label_values(&[operation]).inc();
    if error.is_authorization_failure() {
        m::AUTHORIZATION_DENIALS.inc();
    }
}

// =============================================================================
// TOKEN API
// =============================================================================

impl<A: AuthorizationOracle, E: EventSink> TokenApi for TokenService<A, E> {
    #[instrument(skip(self), level = "debug")]
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> TokenResult<TransferReceipt> {
        self.execute("transfer", |state| {
            state.pause.ensure_active()?;
            let receipt = state.execute_transfer(caller, to, amount)?;
            log_transfer_event!(
                debug,
                "Transfer applied",
                caller,
                to,
                amount,
                decision = receipt.plan.quote.decision.as_str(),
                tax = %receipt.plan.quote.tax_amount
            );
            let events = transfer_events(&receipt);
            Ok((receipt, events))
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn approve(&self, caller: Address, spender: Address, amount: U256) -> TokenResult<()> {
        self.execute("approve", |state| {
            state.pause.ensure_active()?;
            if caller.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            let old_amount = state.allowances.approve(caller, spender, amount)?;
            Ok((
                (),
                vec![TokenEvent::Approval {
                    owner: caller,
                    spender,
                    old_amount,
                    new_amount: amount,
                }],
            ))
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TransferReceipt> {
        self.execute("transfer_from", |state| {
            state.pause.ensure_active()?;
            let old_amount = state.allowances.allowance(&from, &caller);
            let receipt = state.execute_transfer_from(caller, from, to, amount)?;
            log_transfer_event!(
                debug,
                "Delegated transfer applied",
                from,
                to,
                amount,
                spender = ?caller,
                decision = receipt.plan.quote.decision.as_str(),
                tax = %receipt.plan.quote.tax_amount
            );
            let mut events = transfer_events(&receipt);
            events.push(TokenEvent::Approval {
                owner: from,
                spender: caller,
                old_amount,
                new_amount: receipt.remaining_allowance.unwrap_or(old_amount),
            });
            Ok((receipt, events))
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn increase_allowance(&self, caller: Address, spender: Address, added: U256) -> TokenResult<U256> {
        self.execute("increase_allowance", |state| {
            state.pause.ensure_active()?;
            if caller.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            let (old_amount, new_amount) = state.allowances.increase_allowance(caller, spender, added)?;
            Ok((
                new_amount,
                vec![TokenEvent::Approval {
                    owner: caller,
                    spender,
                    old_amount,
                    new_amount,
                }],
            ))
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn decrease_allowance(
        &self,
        caller: Address,
        spender: Address,
        subtracted: U256,
    ) -> TokenResult<U256> {
        self.execute("decrease_allowance", |state| {
            state.pause.ensure_active()?;
            if caller.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            let (old_amount, new_amount) =
                state.allowances.decrease_allowance(caller, spender, subtracted)?;
            Ok((
                new_amount,
                vec![TokenEvent::Approval {
                    owner: caller,
                    spender,
                    old_amount,
                    new_amount,
                }],
            ))
        })
    }
}

// =============================================================================
// TOKEN QUERY
// =============================================================================

impl<A: AuthorizationOracle, E: EventSink> TokenQuery for TokenService<A, E> {
    fn name(&self) -> String {
        self.state.read().metadata.name.clone()
    }

    fn symbol(&self) -> String {
        self.state.read().metadata.symbol.clone()
    }

    fn decimals(&self) -> u8 {
        self.state.read().metadata.decimals
    }

    fn total_supply(&self) -> U256 {
        self.state.read().balances.total_supply()
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.state.read().balances.balance_of(&account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state.read().allowances.allowance(&owner, &spender)
    }

    fn governance(&self) -> Address {
        self.state.read().roles.governance()
    }

    fn oracle(&self) -> Address {
        self.state.read().roles.oracle()
    }

    fn rbs(&self) -> Address {
        self.state.read().roles.rbs()
    }

    fn treasury(&self) -> Address {
        self.state.read().roles.treasury()
    }

    fn authorization_collaborator(&self) -> Address {
        self.state.read().roles.authorization_collaborator()
    }

    fn buy_tax(&self) -> BasisPoints {
        self.state.read().tax.buy_tax()
    }

    fn sell_tax(&self) -> BasisPoints {
        self.state.read().tax.sell_tax()
    }

    fn is_whitelisted(&self, account: Address) -> bool {
        self.state.read().registry.is_whitelisted(&account)
    }

    fn is_governance_listed(&self, account: Address, list: GovernanceList) -> bool {
        self.state.read().registry.is_listed(&account, list)
    }

    fn is_paused(&self) -> bool {
        self.state.read().pause.is_paused()
    }

    fn quote_tax(&self, from: Address, to: Address, amount: U256) -> TokenResult<TaxQuote> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let state = self.state.read();
        state
            .tax
            .compute_tax(&state.registry, state.roles.treasury(), &from, &to, amount)
    }
}

// =============================================================================
// ADMIN API
// =============================================================================

impl<A: AuthorizationOracle, E: EventSink> AdminApi for TokenService<A, E> {
    #[instrument(skip(self))]
    fn mint(&self, caller: Address, to: Address, amount: U256) -> TokenResult<()> {
        self.execute("mint", |state| {
            state.pause.ensure_active()?;
            self.access.require_oracle_or_rbs(&state.roles, caller)?;
            state.balances.mint(to, amount)?;
            log_transfer_event!(info, "Minted", Address::ZERO, to, amount, minter = ?caller);
            Ok((
                (),
                vec![TokenEvent::Transfer {
                    from: Address::ZERO,
                    to,
                    amount,
                }],
            ))
        })
    }

    #[instrument(skip(self))]
    fn set_governance(&self, caller: Address, governance: Address) -> TokenResult<()> {
        self.set_role(caller, Role::Governance, governance)
    }

    #[instrument(skip(self))]
    fn set_oracle(&self, caller: Address, oracle: Address) -> TokenResult<()> {
        self.set_role(caller, Role::Oracle, oracle)
    }

    #[instrument(skip(self))]
    fn set_rbs(&self, caller: Address, rbs: Address) -> TokenResult<()> {
        self.set_role(caller, Role::Rbs, rbs)
    }

    #[instrument(skip(self))]
    fn set_treasury(&self, caller: Address, treasury: Address) -> TokenResult<()> {
        self.set_role(caller, Role::Treasury, treasury)
    }

    #[instrument(skip(self))]
    fn set_authorization_collaborator(&self, caller: Address, collaborator: Address) -> TokenResult<()> {
        self.set_role(caller, Role::AuthorizationCollaborator, collaborator)
    }

    #[instrument(skip(self))]
    fn set_tax_rates(&self, caller: Address, buy: BasisPoints, sell: BasisPoints) -> TokenResult<()> {
        self.execute("set_tax_rates", |state| {
            state.pause.ensure_active()?;
            self.access.require_governance(&state.roles, caller)?;
            let (old_buy, old_sell) = state.tax.set_rates(buy, sell)?;
            info!(buy = ?buy, sell = ?sell, "Tax rates updated");
            Ok((
                (),
                vec![TokenEvent::TaxRatesUpdated {
                    old_buy,
                    new_buy: buy,
                    old_sell,
                    new_sell: sell,
                }],
            ))
        })
    }

    #[instrument(skip(self))]
    fn update_whitelist(&self, caller: Address, account: Address, listed: bool) -> TokenResult<()> {
        self.execute("update_whitelist", |state| {
            state.pause.ensure_active()?;
            self.access.require_governance(&state.roles, caller)?;
            if account.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            let old = state.registry.set_whitelist(account, listed);
            info!(account = ?account, listed, "Whitelist updated");
            Ok((
                (),
                vec![TokenEvent::WhitelistUpdated {
                    account,
                    old,
                    new: listed,
                }],
            ))
        })
    }

    #[instrument(skip(self))]
    fn update_governance_list(
        &self,
        caller: Address,
        account: Address,
        list: GovernanceList,
        listed: bool,
    ) -> TokenResult<()> {
        self.execute("update_governance_list", |state| {
            state.pause.ensure_active()?;
            self.access.require_governance(&state.roles, caller)?;
            if account.is_zero() {
                return Err(TokenError::ZeroAddress);
            }
            let old = state.registry.set_governance_list(account, list, listed);
            info!(account = ?account, list = %list, listed, "Governance list updated");
            Ok((
                (),
                vec![TokenEvent::GovernanceListUpdated {
                    account,
                    list,
                    old,
                    new: listed,
                }],
            ))
        })
    }

    #[instrument(skip(self))]
    fn pause(&self, caller: Address) -> TokenResult<()> {
        self.execute("pause", |state| {
            self.access.require_governance(&state.roles, caller)?;
            state.pause.pause()?;
            warn!(by = ?caller, "Ledger paused");
            Ok(((), vec![TokenEvent::Paused { by: caller }]))
        })
    }

    #[instrument(skip(self))]
    fn unpause(&self, caller: Address) -> TokenResult<()> {
        self.execute("unpause", |state| {
            self.access.require_governance(&state.roles, caller)?;
            state.pause.unpause()?;
            info!(by = ?caller, "Ledger resumed");
            Ok(((), vec![TokenEvent::Unpaused { by: caller }]))
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
