//! Documentos generados: talón de participación (PDF) y cartel QR por
//! comercio. Todo se produce en memoria y se devuelve como bytes; nada se
//! persiste en el servidor.

pub mod cartel;
pub mod talon;

pub use cartel::{build_cartel_pdf, participation_url, qr_png, CartelSize};
pub use talon::{build_talon_pdf, TalonData};
