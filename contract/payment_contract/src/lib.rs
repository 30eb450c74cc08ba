#![no_std]

mod billing;
mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, Address, Env, String};

use storage_types::DataKey;

pub use billing::elapsed_cycles;
pub use storage_types::{Error, Plan, Subscription};

#[contract]
pub struct PaymentContract;

#[contractimpl]
impl PaymentContract {
    /// Initialize the contract with the token used for all deposits and payouts.
    pub fn initialize(env: Env, token_address: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::TokenAddress) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage()
            .instance()
            .set(&DataKey::TokenAddress, &token_address);
        env.storage().instance().set(&DataKey::PlanCount, &0u32);

        Ok(())
    }

    /// Create a new billing plan. The authorized caller becomes its merchant
    /// and receives all proceeds from the plan.
    ///
    /// The registry is append-only: ids are sequential from 0 and a plan is
    /// never modified or deleted once created.
    pub fn create_plan(
        env: Env,
        merchant: Address,
        amount: i128,
        description: String,
        frequency: u64,
    ) -> Result<u32, Error> {
        merchant.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if frequency == 0 {
            return Err(Error::InvalidFrequency);
        }

        let plan_id = plan_count(&env)?;
        let plan = Plan {
            merchant: merchant.clone(),
            amount,
            description,
            frequency,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Plan(plan_id), &plan);
        env.storage()
            .instance()
            .set(&DataKey::PlanCount, &(plan_id + 1));

        events::emit_plan_created(
            &env,
            events::PlanCreatedEvent {
                plan_id,
                merchant,
                amount,
                frequency,
            },
        );

        Ok(plan_id)
    }

    /// Subscribe to a plan, prepaying `cycles` billing cycles in one deposit.
    ///
    /// `deposit` must equal `plan.amount * cycles` exactly; the contract never
    /// issues change. The deposit is escrowed by the contract until
    /// cancellation settles it.
    pub fn subscribe(
        env: Env,
        subscriber: Address,
        plan_id: u32,
        cycles: u32,
        deposit: i128,
    ) -> Result<(), Error> {
        subscriber.require_auth();

        let plan = load_plan(&env, plan_id)?;

        if cycles == 0 {
            return Err(Error::InvalidCycleCount);
        }

        let expected = plan
            .amount
            .checked_mul(cycles as i128)
            .ok_or(Error::Overflow)?;
        if deposit != expected {
            return Err(Error::IncorrectDeposit);
        }

        let key = DataKey::Subscription(subscriber.clone(), plan_id);
        if env.storage().persistent().has(&key) {
            return Err(Error::AlreadySubscribed);
        }

        billing::collect_deposit(&env, &subscriber, deposit)?;

        let sub = Subscription {
            subscriber: subscriber.clone(),
            plan_id,
            start_time: env.ledger().timestamp(),
            cycles_paid: cycles,
            amount_deposited: deposit,
        };
        env.storage().persistent().set(&key, &sub);

        events::emit_subscribed(
            &env,
            events::SubscribedEvent {
                subscriber,
                plan_id,
                cycles_paid: cycles,
                amount_deposited: deposit,
            },
        );

        Ok(())
    }

    /// Cancel the caller's subscription to `plan_id` and settle the escrow:
    /// cycles already elapsed are paid to the merchant, the remainder is
    /// refunded to the subscriber.
    ///
    /// Only the subscriber can cancel; the record is keyed by the caller, so
    /// anyone else simply has no subscription to settle.
    pub fn cancel(env: Env, subscriber: Address, plan_id: u32) -> Result<(), Error> {
        subscriber.require_auth();

        let plan = load_plan(&env, plan_id)?;

        let key = DataKey::Subscription(subscriber.clone(), plan_id);
        let sub: Subscription = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NoActiveSubscription)?;

        let now = env.ledger().timestamp();
        let (merchant_share, refund) = billing::settlement_split(&plan, &sub, now)?;

        // Remove the record before paying out, so a reentrant call finds no
        // escrow left to settle.
        env.storage().persistent().remove(&key);

        billing::pay_out(&env, &plan.merchant, merchant_share)?;
        billing::pay_out(&env, &subscriber, refund)?;

        events::emit_cancelled(
            &env,
            events::CancelledEvent {
                subscriber,
                plan_id,
                merchant_share,
                refund,
            },
        );

        Ok(())
    }

    /// Plan lookup by id.
    pub fn get_plan(env: Env, plan_id: u32) -> Option<Plan> {
        env.storage().persistent().get(&DataKey::Plan(plan_id))
    }

    /// Subscription lookup by (subscriber, plan) key.
    pub fn get_subscription(env: Env, subscriber: Address, plan_id: u32) -> Option<Subscription> {
        env.storage()
            .persistent()
            .get(&DataKey::Subscription(subscriber, plan_id))
    }

    /// Number of plans ever created, i.e. the next id to be assigned.
    pub fn get_plan_count(env: Env) -> Result<u32, Error> {
        plan_count(&env)
    }
}

fn plan_count(env: &Env) -> Result<u32, Error> {
    env.storage()
        .instance()
        .get(&DataKey::PlanCount)
        .ok_or(Error::NotInitialized)
}

fn load_plan(env: &Env, plan_id: u32) -> Result<Plan, Error> {
    if plan_id >= plan_count(env)? {
        return Err(Error::InvalidPlanId);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Plan(plan_id))
        .ok_or(Error::InvalidPlanId)
}
