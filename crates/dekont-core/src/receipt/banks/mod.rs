//! Per-bank receipt strategies.
//!
//! Each submodule holds one unit struct implementing [`ReceiptStrategy`]
//! together with the patterns only that layout uses.

mod akbank;
mod denizbank;
mod enpara;
mod garanti;
mod generic;
mod halkbank;
mod ing;
mod isbank;
mod kuveytturk;
mod vakifbank;
mod vakifkatilim;
mod yapikredi;
mod ziraat;

pub use akbank::AkbankStrategy;
pub use denizbank::DenizbankStrategy;
pub use enpara::EnparaStrategy;
pub use garanti::GarantiStrategy;
pub use generic::GenericStrategy;
pub use halkbank::HalkbankStrategy;
pub use ing::IngStrategy;
pub use isbank::IsbankStrategy;
pub use kuveytturk::KuveytTurkStrategy;
pub use vakifbank::VakifbankStrategy;
pub use vakifkatilim::VakifKatilimStrategy;
pub use yapikredi::YapiKrediStrategy;
pub use ziraat::ZiraatStrategy;

use crate::models::record::FormatTag;
use crate::receipt::ReceiptStrategy;

static STRATEGIES: [&dyn ReceiptStrategy; 12] = [
    &IsbankStrategy,
    &AkbankStrategy,
    &VakifKatilimStrategy,
    &KuveytTurkStrategy,
    &DenizbankStrategy,
    &EnparaStrategy,
    &GarantiStrategy,
    &VakifbankStrategy,
    &YapiKrediStrategy,
    &ZiraatStrategy,
    &HalkbankStrategy,
    &IngStrategy,
];

/// Strategy registered for `tag`, or the generic one.
pub fn strategy_for(tag: FormatTag) -> &'static dyn ReceiptStrategy {
    STRATEGIES
        .iter()
        .copied()
        .find(|strategy| strategy.tag() == tag)
        .unwrap_or(&GenericStrategy)
}
