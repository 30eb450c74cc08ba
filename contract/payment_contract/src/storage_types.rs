use soroban_sdk::{contracterror, contracttype, Address, String};

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    // Instance storage
    TokenAddress,
    PlanCount,
    // Persistent storage
    Plan(u32),
    Subscription(Address, u32),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Plan creation with a non-positive price per cycle.
    InvalidAmount = 3,
    /// Plan creation with a zero-length billing cycle.
    InvalidFrequency = 4,
    /// Plan id outside the range of ids assigned so far.
    InvalidPlanId = 5,
    /// Subscribe with zero prepaid cycles.
    InvalidCycleCount = 6,
    /// Deposit does not equal `plan.amount * cycles` exactly.
    IncorrectDeposit = 7,
    /// The (subscriber, plan) pair already has an active subscription.
    AlreadySubscribed = 8,
    /// Cancel with no matching (subscriber, plan) record.
    NoActiveSubscription = 9,
    /// Arithmetic overflow in money math.
    Overflow = 10,
}

/// A merchant-defined recurring charge. Immutable once created.
#[derive(Clone)]
#[contracttype]
pub struct Plan {
    pub merchant: Address,
    /// Price per billing cycle, in the token's smallest unit. Always > 0.
    pub amount: i128,
    pub description: String,
    /// Length of one billing cycle in seconds. Always > 0.
    pub frequency: u64,
}

/// A subscriber's prepaid enrollment in a plan, keyed by (subscriber, plan_id).
/// Created by `subscribe`, deleted by `cancel`; never mutated in between.
#[derive(Clone)]
#[contracttype]
pub struct Subscription {
    pub subscriber: Address,
    pub plan_id: u32,
    /// Ledger timestamp at subscription creation.
    pub start_time: u64,
    /// Cycles prepaid up front. Always > 0.
    pub cycles_paid: u32,
    /// Escrowed total, exactly `plan.amount * cycles_paid`.
    pub amount_deposited: i128,
}
