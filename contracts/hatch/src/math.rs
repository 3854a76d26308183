//! Fixed-point arithmetic for the exchange rate and the settlement split.
//!
//! Everything is integer-only, truncating, and checked: helpers return `None`
//! on overflow and callers turn that into `Error::Overflow`.

/// Parts-per-million base shared by the exchange rate and both percentages.
pub const PPM: i128 = 1_000_000;

/// Project tokens minted for `value` contribution units:
/// `floor(value * exchange_rate / PPM)`.
pub fn contribution_to_tokens(value: i128, exchange_rate: i128) -> Option<i128> {
    value.checked_mul(exchange_rate)?.checked_div(PPM)
}

/// `floor(amount * pct / PPM)`.
pub fn ppm_of(amount: i128, pct: u32) -> Option<i128> {
    amount.checked_mul(pct as i128)?.checked_div(PPM)
}

/// Split `total_raised` into `(for_beneficiary, for_reserve)`.
pub fn split_funds(total_raised: i128, funding_for_beneficiary_pct: u32) -> Option<(i128, i128)> {
    let for_beneficiary = ppm_of(total_raised, funding_for_beneficiary_pct)?;
    let for_reserve = total_raised.checked_sub(for_beneficiary)?;
    Some((for_beneficiary, for_reserve))
}

/// Tokens the beneficiary receives so that `minted` ends up being
/// `supply_offered_pct` ppm of the final supply.
///
/// `floor(minted * (PPM - supply_offered_pct) / supply_offered_pct)`.
pub fn beneficiary_tokens(minted: i128, supply_offered_pct: u32) -> Option<i128> {
    let offered = supply_offered_pct as i128;
    if offered == 0 {
        return None;
    }
    minted
        .checked_mul(PPM.checked_sub(offered)?)?
        .checked_div(offered)
}
