//! Status-line macros.
//!
//! Library crates report progress through these instead of printing. They are
//! plain `tracing` events under the `ipsieve::status` targets, so whichever
//! subscriber the binary installs decides how (and whether) they are rendered.

pub const STATUS_TARGET: &str = "ipsieve::status";
pub const SUCCESS_TARGET: &str = "ipsieve::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(target: $crate::print::STATUS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__private::tracing::info!(target: $crate::print::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__private::tracing::warn!(target: $crate::print::STATUS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__private::tracing::error!(target: $crate::print::STATUS_TARGET, $($arg)*)
    };
}
