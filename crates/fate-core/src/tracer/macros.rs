#[cfg(feature = "tracing")]
#[inline(always)]
pub fn __trace_write(args: std::fmt::Arguments) {
    if let Ok(mut tracer) = crate::tracer::TRACER.lock() {
        tracer.write(args.to_string());
    }
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            $crate::tracer::macros::__trace_write(format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! trace_dump {
    () => {
        #[cfg(feature = "tracing")]
        {
            if let Ok(tracer) = $crate::tracer::TRACER.lock() {
                tracer.print();
            }
        }
    };
}

#[macro_export]
macro_rules! trace_obj {
    ($obj:expr) => {
        #[cfg(feature = "tracing")]
        {
            if let Ok(mut tracer) = $crate::tracer::TRACER.lock() {
                tracer.log($obj);
            }
        }
    };
}

#[macro_export]
macro_rules! trace_wheel_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            $crate::tracer::macros::__trace_write(
                format_args!("[WHEEL EVENT] {}", format_args!($($arg)*))
            );
        }
    };
}
