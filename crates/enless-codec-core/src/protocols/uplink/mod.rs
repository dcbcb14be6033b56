//! Enless uplink frame decoding.
//!
//! A frame is a 6-byte header followed by fields laid out back to back in
//! the order given by the sensor type's schema. The parser reads the
//! sensor-type code, requires the full schema payload to be present, then
//! decodes each field: big-endian read, optional sign extension, scaling
//! rounded to one decimal, and the sensor type's range check.
//!
//! Truncated frames are rejected as a whole; implausible readings are not
//! errors and surface as tagged measurements without a value. Offsets live in
//! `layout`, bounds-checked access in `reader`, numeric rules in `value`.
//!
//! Version française (résumé):
//! Le module décode les trames montantes Enless : en-tête de 6 octets puis
//! champs dans l'ordre du schéma du type capteur. Une trame tronquée est
//! rejetée ; une mesure hors plage est marquée « Sensor broken » sans valeur.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod value;

pub use error::FrameError;
pub use parser::{FieldReading, Frame, parse_frame};
