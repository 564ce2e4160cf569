//! Demo Mode answers.
//!
//! When the query service cannot be reached (or answers with anything other
//! than a usable `answer`), the chat still replies: one of a fixed set of
//! general financial tips, marked so the user can tell it is canned.

use rand::Rng;
use rand::seq::SliceRandom;

/// Marker every fallback message starts with.
pub const DEMO_MODE_PREFIX: &str = "**Demo Mode**:";

pub const CANNED_RESPONSES: [&str; 5] = [
    "A good starting point for budgeting is the 50/30/20 rule: put 50% of your take-home pay toward needs, 30% toward wants, and 20% toward savings and debt repayment.",
    "Before investing, build an emergency fund that covers three to six months of essential expenses and keep it in a liquid, low-risk account.",
    "Diversification lowers risk. Spreading money across asset classes such as equities, bonds, and deposits means one bad investment can't sink your whole portfolio.",
    "Pay off high-interest debt like credit card balances first. The interest you avoid is a guaranteed return that few investments can beat.",
    "Start investing early and stay consistent. Thanks to compounding, small monthly contributions through a SIP can grow significantly over the long term.",
];

/// Picks one canned response uniformly at random and marks it as Demo Mode.
pub fn demo_response<R: Rng + ?Sized>(rng: &mut R) -> String {
    let canned = CANNED_RESPONSES
        .choose(rng)
        .copied()
        .unwrap_or(CANNED_RESPONSES[0]);
    format!("{DEMO_MODE_PREFIX} {canned}")
}
