use soroban_sdk::{token, Address, Env};

use crate::storage_types::{DataKey, Error, Plan, Subscription};

/// Number of billing cycles consumed between `start_time` and `now`.
///
/// Floor of elapsed time over the cycle length, clamped to `[0, cycles_paid]`:
/// a cycle is never owed before it has begun, and nothing beyond the prepaid
/// horizon is billable.
pub fn elapsed_cycles(now: u64, start_time: u64, frequency: u64, cycles_paid: u32) -> u32 {
    let elapsed = now.saturating_sub(start_time) / frequency;
    if elapsed >= cycles_paid as u64 {
        cycles_paid
    } else {
        elapsed as u32
    }
}

/// Split the escrowed deposit into (merchant share, subscriber refund).
///
/// The merchant share is a multiple of `plan.amount`, so the subtraction is
/// exact and the two legs always sum to `amount_deposited`.
pub fn settlement_split(plan: &Plan, sub: &Subscription, now: u64) -> Result<(i128, i128), Error> {
    let consumed = elapsed_cycles(now, sub.start_time, plan.frequency, sub.cycles_paid);
    let merchant_share = plan
        .amount
        .checked_mul(consumed as i128)
        .ok_or(Error::Overflow)?;
    let refund = sub
        .amount_deposited
        .checked_sub(merchant_share)
        .ok_or(Error::Overflow)?;
    Ok((merchant_share, refund))
}

/// Pull the deposit from the subscriber into contract escrow.
pub fn collect_deposit(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
    let client = token_client(env)?;
    client.transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Pay out one settlement leg from escrow. Zero-amount legs are skipped.
pub fn pay_out(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let client = token_client(env)?;
    client.transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}

fn token_client(env: &Env) -> Result<token::TokenClient<'_>, Error> {
    let token_address: Address = env
        .storage()
        .instance()
        .get(&DataKey::TokenAddress)
        .ok_or(Error::NotInitialized)?;
    Ok(token::TokenClient::new(env, &token_address))
}
