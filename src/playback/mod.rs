pub(crate) mod clock;
pub(crate) mod sink;
pub(crate) mod time;
