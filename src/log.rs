//! Serial logging
//!
//! With the `esp32-log` feature the `log!` macro forwards to
//! `esp_println::println!`. Without it the arguments are still type-checked
//! but nothing is emitted.

#[cfg(feature = "esp32-log")]
pub(crate) use esp_println::println;

macro_rules! log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        $crate::log::println!($($arg)*);
        #[cfg(not(feature = "esp32-log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
