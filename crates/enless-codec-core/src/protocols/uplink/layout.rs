pub const TRANSMITTER_ID_RANGE: std::ops::Range<usize> = 0..3;
pub const SENSOR_TYPE_OFFSET: usize = 3;
pub const RESERVED_RANGE: std::ops::Range<usize> = 4..6;
pub const FIELDS_OFFSET: usize = 6;

pub const HEADER_LEN: usize = FIELDS_OFFSET;
pub const MAX_FIELD_WIDTH: usize = 8;
