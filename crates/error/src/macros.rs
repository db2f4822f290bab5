/// Constructs a [`crate::Error::InvalidData`] for the given format string.
#[macro_export]
macro_rules! errdata {
    ($($args:tt)*) => { $crate::Error::InvalidData(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::InvalidInput`] for the given format string.
#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => { $crate::Error::InvalidInput(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::InvalidConfiguration`] for the given format string.
#[macro_export]
macro_rules! errconfig {
    ($($args:tt)*) => { $crate::Error::InvalidConfiguration(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::NotResident`] for the given format string.
#[macro_export]
macro_rules! errresident {
    ($($args:tt)*) => { $crate::Error::NotResident(format!($($args)*)).into() };
}
