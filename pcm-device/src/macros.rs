/// Macro to use for modules constrained to the ALSA driver.
macro_rules! cfg_alsa {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "alsa")]
            #[cfg_attr(docsrs, doc(
                cfg(feature = "alsa")
            ))]
            $item
        )*
    }
}

/// Convert a native return code into a result, where negative values are
/// errors carrying the negated error number.
#[allow(unused_macros)]
macro_rules! errno {
    ($expr:expr) => {{
        let result = $expr;

        if result < 0 {
            Err($crate::errno::Errno::new(-result as i32))
        } else {
            Ok(result)
        }
    }};
}
