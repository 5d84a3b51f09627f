// Compile-time filtered logging. Each level is a cargo feature so that
// disabled levels cost nothing; enabling a level enables everything above it.

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log_trace")]
        {
            println!("[TRACE {}:{}] {}", file!(), line!(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "log_trace", feature = "log_debug"))]
        {
            println!("[DEBUG {}:{}] {}", file!(), line!(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "log_trace", feature = "log_debug", feature = "log_info"))]
        {
            println!("[INFO {}:{}] {}", file!(), line!(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(any(
            feature = "log_trace",
            feature = "log_debug",
            feature = "log_info",
            feature = "log_warn"
        ))]
        {
            println!("[WARN {}:{}] {}", file!(), line!(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        #[cfg(any(
            feature = "log_trace",
            feature = "log_debug",
            feature = "log_info",
            feature = "log_warn",
            feature = "log_error"
        ))]
        {
            eprintln!("[ERROR {}:{}] {}", file!(), line!(), format_args!($($arg)*));
        }
    };
}
