//! State machine fuzzing for the reservoir contract
//!
//! Run with: cargo test --features fuzz
//! Increase cases: PROPTEST_CASES=1000 cargo test --features fuzz
//!
//! Every step checks:
//! - "No mutation on error": a failed call leaves the whole contract untouched
//! - Conservation: sum of balances == total supply, minted - supply == burned
//! - Solvency: redeeming the whole supply never pays more than the reserve
//! - Redemptions never pay more than the reserve held before them

#![cfg(feature = "fuzz")]

use proptest::prelude::*;
use reservoir::*;

// ============================================================================
// SECTION 1: ACTORS AND SNAPSHOTS
// ============================================================================

const DEPLOYED_AT: u64 = 1_000;

fn addr(label: &str) -> Address {
    Address::from_label(label).unwrap()
}

fn actors() -> [Address; 5] {
    [
        addr("controller"),
        addr("alice"),
        addr("bob"),
        addr("carol"),
        addr("contract"),
    ]
}

/// Captures everything a failed call must leave untouched
#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    ledger: Ledger,
    reserve: MemoryReserve,
    venue: ConstantProductVenue,
    pair: Address,
    events: usize,
}

impl Snapshot {
    fn take(c: &MemoryReservoir) -> Self {
        Self {
            ledger: c.ledger().clone(),
            reserve: c.reserve().clone(),
            venue: c.venue().clone(),
            pair: c.pair(),
            events: c.events().len(),
        }
    }
}

fn assert_unchanged(c: &MemoryReservoir, snapshot: &Snapshot, context: &str) {
    assert_eq!(&Snapshot::take(c), snapshot, "{context}: failed call mutated state");
}

fn assert_global_invariants(c: &MemoryReservoir, context: &str) {
    let ledger = c.ledger();
    assert_eq!(
        ledger.sum_of_balances(),
        Some(ledger.total_supply()),
        "{context}: balances do not sum to supply"
    );
    assert_eq!(
        ledger.total_minted() - ledger.total_supply(),
        ledger.total_burned(),
        "{context}: burned counter drifted"
    );

    let reserve_held = c.reserve().balance_of(&c.address());
    if ledger.total_supply() > 0 {
        if let Ok(payout) = c.preview_redeem(ledger.total_supply()) {
            assert!(payout <= reserve_held, "{context}: full redemption exceeds reserve");
        }
    }
}

// ============================================================================
// SECTION 2: ACTIONS
// ============================================================================

#[derive(Clone, Debug)]
enum Action {
    Transfer { from: usize, to: usize, amount: u128 },
    Approve { owner: usize, spender: usize, amount: u128 },
    TransferFrom { spender: usize, from: usize, to: usize, amount: u128 },
    Issue { who: usize, deposit: u128 },
    Redeem { who: usize, shares: u128 },
    Sweep { who: usize },
    Advance { secs: u64 },
}

fn amount_strategy() -> impl Strategy<Value = u128> {
    prop_oneof![
        Just(0u128),
        1u128..100_000,
        1_000_000_000_000u128..100_000_000_000_000,
        WAD / 1_000..500 * WAD,
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    let idx = || 0usize..5;
    prop_oneof![
        4 => (idx(), idx(), amount_strategy())
            .prop_map(|(from, to, amount)| Action::Transfer { from, to, amount }),
        1 => (idx(), idx(), prop_oneof![amount_strategy(), Just(INFINITE_ALLOWANCE)])
            .prop_map(|(owner, spender, amount)| Action::Approve { owner, spender, amount }),
        2 => (idx(), idx(), idx(), amount_strategy())
            .prop_map(|(spender, from, to, amount)| Action::TransferFrom { spender, from, to, amount }),
        2 => (idx(), amount_strategy()).prop_map(|(who, deposit)| Action::Issue { who, deposit }),
        2 => (idx(), amount_strategy()).prop_map(|(who, shares)| Action::Redeem { who, shares }),
        1 => idx().prop_map(|who| Action::Sweep { who }),
        1 => (0u64..40 * 86_400).prop_map(|secs| Action::Advance { secs }),
    ]
}

// ============================================================================
// SECTION 3: STATE MACHINE
// ============================================================================

struct Machine {
    contract: MemoryReservoir,
    now: u64,
}

impl Machine {
    fn new(with_pool: bool) -> Self {
        let [controller, alice, bob, carol, contract] = actors();
        let config = VaultConfig::new(controller, contract, addr("usd"), addr("router"), DEPLOYED_AT);
        let venue = ConstantProductVenue::new(addr("router"), addr("pair"), contract, addr("usd"));
        let mut c = Reservoir::new(config, MemoryReserve::new(addr("usd")), venue, 100_000 * WAD).unwrap();

        let call = Call::new(controller, DEPLOYED_AT);
        for who in [alice, bob, carol] {
            c.transfer(call, who, 10_000 * WAD).unwrap();
            c.reserve_mut().mint(&who, 10_000 * WAD).unwrap();
            c.reserve_mut().approve(&who, &contract, INFINITE_ALLOWANCE);
        }

        if with_pool {
            c.transfer(call, addr("pair"), 20_000 * WAD).unwrap();
            c.reserve_mut().mint(&addr("pair"), 40_000 * WAD).unwrap();
            c.venue_mut().sync(20_000 * WAD, 40_000 * WAD);
            let cap = c.authorize_controller(&controller).unwrap();
            c.set_pair_address(&cap, addr("pair")).unwrap();
        }

        Self {
            contract: c,
            now: DEPLOYED_AT,
        }
    }

    fn execute(&mut self, action: &Action, step: usize) {
        let who = actors();
        let context = format!("step {step}: {action:?}");
        let snapshot = Snapshot::take(&self.contract);
        let reserve_before = self.contract.reserve().balance_of(&self.contract.address());
        let now = self.now;
        let c = &mut self.contract;

        let result: Result<()> = match *action {
            Action::Transfer { from, to, amount } => c
                .transfer(Call::new(who[from], now), who[to], amount)
                .map(|receipt| {
                    if let TransferKind::Taxed(split) = receipt.kind {
                        assert_eq!(split.total_debit(), amount, "{context}: debit mismatch");
                        assert_eq!(split.burn + split.controller + split.swap, split.fee);
                    } else {
                        assert_eq!(receipt.net, amount, "{context}: untaxed transfer lost value");
                    }
                }),
            Action::Approve { owner, spender, amount } => {
                c.approve(Call::new(who[owner], now), who[spender], amount)
            }
            Action::TransferFrom { spender, from, to, amount } => c
                .transfer_from(Call::new(who[spender], now), who[from], who[to], amount)
                .map(|_| ()),
            Action::Issue { who: i, deposit } => {
                let result = c.issue_shares(Call::new(who[i], now), deposit).map(|_| ());
                if now > DEPLOYED_AT + ISSUANCE_WINDOW_SECS {
                    assert_eq!(result, Err(ReservoirError::IssuancePeriodEnded), "{context}");
                }
                result
            }
            Action::Redeem { who: i, shares } => c
                .redeem_shares(Call::new(who[i], now), shares)
                .map(|redemption| {
                    assert!(redemption.payout <= reserve_before, "{context}: overpaid");
                }),
            Action::Sweep { who: i } => c.burn_contract_balance(Call::new(who[i], now)).map(|_| ()),
            Action::Advance { secs } => {
                self.now = self.now.saturating_add(secs);
                Ok(())
            }
        };

        if result.is_err() {
            assert_unchanged(&self.contract, &snapshot, &context);
        }
        assert_global_invariants(&self.contract, &context);
    }
}

// ============================================================================
// SECTION 4: PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_state_machine_without_pool(actions in proptest::collection::vec(action_strategy(), 1..60)) {
        let mut machine = Machine::new(false);
        for (step, action) in actions.iter().enumerate() {
            machine.execute(action, step);
        }
    }

    #[test]
    fn fuzz_state_machine_with_pool(actions in proptest::collection::vec(action_strategy(), 1..60)) {
        let mut machine = Machine::new(true);
        for (step, action) in actions.iter().enumerate() {
            machine.execute(action, step);
        }
    }

    #[test]
    fn fuzz_prop_floor_waiver(amount in MIN_TRANSFER..22_222_222_222_222u128) {
        let mut machine = Machine::new(true);
        let [_, alice, bob, _, _] = actors();
        let before = machine.contract.balance_of(&bob);
        let receipt = machine.contract.transfer(Call::new(alice, DEPLOYED_AT), bob, amount).unwrap();
        prop_assert_eq!(receipt.kind, TransferKind::Waived);
        prop_assert_eq!(machine.contract.balance_of(&bob) - before, amount);
    }

    #[test]
    fn fuzz_prop_exempt_transfers_untaxed(
        amount in MIN_TRANSFER..1_000 * WAD,
        to_controller in any::<bool>(),
    ) {
        let mut machine = Machine::new(true);
        let [controller, alice, _, _, contract] = actors();
        let to = if to_controller { controller } else { contract };
        let before = machine.contract.balance_of(&to);
        let supply = machine.contract.total_supply();

        machine.contract.transfer(Call::new(alice, DEPLOYED_AT), to, amount).unwrap();
        prop_assert_eq!(machine.contract.balance_of(&to) - before, amount);
        prop_assert_eq!(machine.contract.total_supply(), supply);
    }

    #[test]
    fn fuzz_prop_issuance_window(offset in 0u64..2 * ISSUANCE_WINDOW_SECS) {
        let mut machine = Machine::new(false);
        let [_, alice, _, _, _] = actors();
        let now = DEPLOYED_AT + offset;
        let result = machine.contract.issue_shares(Call::new(alice, now), WAD);
        if offset <= ISSUANCE_WINDOW_SECS {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(ReservoirError::IssuancePeriodEnded));
        }
    }
}

// ============================================================================
// SECTION 5: DETERMINISTIC SEQUENCES
// ============================================================================

#[test]
fn fuzz_deterministic_issue_then_drain() {
    let mut machine = Machine::new(true);
    let steps = [
        Action::Issue { who: 1, deposit: 1_000 * WAD },
        Action::Issue { who: 2, deposit: 2_500 * WAD },
        Action::Transfer { from: 1, to: 2, amount: 300 * WAD },
        Action::Transfer { from: 2, to: 3, amount: 1_234 * WAD },
        Action::Advance { secs: ISSUANCE_WINDOW_SECS + 1 },
        Action::Issue { who: 3, deposit: WAD },
        Action::Redeem { who: 1, shares: 5_000 * WAD },
        Action::Redeem { who: 2, shares: 7_000 * WAD },
        Action::Redeem { who: 3, shares: 9_000 * WAD },
        Action::Sweep { who: 3 },
    ];
    for (step, action) in steps.iter().enumerate() {
        machine.execute(action, step);
    }
}
