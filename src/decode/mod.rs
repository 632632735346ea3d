pub(crate) mod decoder;
pub(crate) mod packet;
pub(crate) mod table;
