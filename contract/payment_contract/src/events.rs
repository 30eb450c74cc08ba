use soroban_sdk::{contracttype, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct PlanCreatedEvent {
    pub plan_id: u32,
    pub merchant: Address,
    pub amount: i128,
    pub frequency: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct SubscribedEvent {
    pub subscriber: Address,
    pub plan_id: u32,
    pub cycles_paid: u32,
    pub amount_deposited: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CancelledEvent {
    pub subscriber: Address,
    pub plan_id: u32,
    pub merchant_share: i128,
    pub refund: i128,
}

pub fn emit_plan_created(env: &Env, event: PlanCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "plan_created"),), event);
}

pub fn emit_subscribed(env: &Env, event: SubscribedEvent) {
    env.events()
        .publish((Symbol::new(env, "subscribed"),), event);
}

pub fn emit_cancelled(env: &Env, event: CancelledEvent) {
    env.events()
        .publish((Symbol::new(env, "cancelled"),), event);
}
