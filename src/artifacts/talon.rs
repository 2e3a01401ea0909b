use chrono::{DateTime, Datelike, Utc};
use chrono_tz::America::Montevideo;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb, TextMatrix,
};

use crate::error::{AppError, AppResult};
use crate::utils::TicketNumber;

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Datos que van impresos en el talón.
#[derive(Debug, Clone)]
pub struct TalonData {
    pub raffle_name: String,
    pub comercio_name: String,
    pub ticket: TicketNumber,
    pub participant_name: String,
    pub participant_phone: String,
    /// Momento de la participación; fecha y mes se muestran en hora de Uruguay
    pub submitted_at: DateTime<Utc>,
}

impl TalonData {
    fn date_str(&self) -> String {
        self.submitted_at
            .with_timezone(&Montevideo)
            .format("%d/%m/%Y, %H:%M")
            .to_string()
    }

    /// "Sorteo de Marzo" si hay mes; si no, el nombre del sorteo.
    fn month_title(&self) -> String {
        let month0 = self.submitted_at.with_timezone(&Montevideo).month0() as usize;
        match MONTH_NAMES.get(month0) {
            Some(name) => format!("Sorteo de {name}"),
            None => self.raffle_name.clone(),
        }
    }
}

fn pdf_err(e: printpdf::Error) -> AppError {
    AppError::InternalError(format!("PDF generation failed: {e}"))
}

// Helvetica no trae métricas acá; 0.5 × tamaño es una aproximación razonable
// del ancho medio de glifo para centrar títulos cortos.
fn centered_x(text: &str, font_size_pt: f32, center_mm: f32) -> Mm {
    let text_width_mm = text.chars().count() as f32 * font_size_pt * 0.5 * 0.3528;
    Mm(center_mm - text_width_mm / 2.0)
}

fn gray() -> Color {
    Color::Rgb(Rgb::new(0.7, 0.7, 0.7, None))
}

fn dark() -> Color {
    Color::Rgb(Rgb::new(0.16, 0.16, 0.16, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn straight_line(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}

fn rotated_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: Mm,
    y: Mm,
    angle_deg: f32,
) {
    layer.begin_text_section();
    layer.set_font(font, font_size);
    layer.set_text_matrix(TextMatrix::TranslateRotate(x.into(), y.into(), angle_deg));
    layer.write_text(text, font);
    layer.end_text_section();
}

/// Genera el talón en PDF.
///
/// Con `background_png` presente y decodificable se usa el diseño con arte de
/// fondo (420×180 escalado a 148 mm); si falta o no decodifica se cae al talón
/// clásico dibujado a mano. El número se imprime tal cual llega: entero crudo
/// con ceros a 4 dígitos, string preformateado sin tocar.
pub fn build_talon_pdf(data: &TalonData, background_png: Option<&[u8]>) -> AppResult<Vec<u8>> {
    if let Some(bytes) = background_png {
        match printpdf::image_crate::load_from_memory(bytes) {
            Ok(background) => return build_background_talon(data, background),
            Err(e) => {
                log::warn!("Talon background not decodable, falling back to classic layout: {e}");
            }
        }
    }

    build_classic_talon(data)
}

/// Variante con arte de fondo: misma proporción que el diseño fuente (420×180).
fn build_background_talon(
    data: &TalonData,
    background: printpdf::image_crate::DynamicImage,
) -> AppResult<Vec<u8>> {
    let w = 148.0_f32;
    let h = 148.0 * (180.0 / 420.0);

    let (doc, page, layer) = PdfDocument::new("Talón de participación", Mm(w), Mm(h), "Talon");
    let layer = doc.get_page(page).get_layer(layer);

    let px_w = background.width() as f32;
    // dpi tal que el ancho en píxeles ocupe exactamente el ancho de página
    let dpi = px_w * 25.4 / w;
    let image = printpdf::Image::from_dynamic_image(&background);
    image.add_to_layer(
        layer.clone(),
        printpdf::ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;

    let ticket_str = data.ticket.formatted();

    layer.set_fill_color(dark());
    layer.use_text(data.month_title(), 11.0, Mm(12.0), Mm(h - 10.0), &bold);

    layer.use_text(
        format!("Participante: {}", data.participant_name),
        9.0,
        Mm(12.0),
        Mm(h - 16.0),
        &regular,
    );
    layer.use_text(
        format!("Teléfono: {}", data.participant_phone),
        9.0,
        Mm(12.0),
        Mm(h - 22.0),
        &regular,
    );

    // Número vertical sobre el borde derecho, color de la marca (#1F2A44)
    layer.set_fill_color(Color::Rgb(Rgb::new(0.12, 0.16, 0.27, None)));
    rotated_text(
        &layer,
        &bold,
        &format!("#{ticket_str}"),
        10.0,
        Mm(w - 12.0),
        Mm(h / 2.0),
        -90.0,
    );

    doc.save_to_bytes().map_err(pdf_err)
}

/// Talón clásico: A6 apaisado, marco, perforaciones punteadas y número en los
/// talones laterales girado ±90°. No necesita ningún asset.
fn build_classic_talon(data: &TalonData) -> AppResult<Vec<u8>> {
    let w = 148.0_f32;
    let h = 105.0_f32;
    let center_x = w / 2.0;

    let stub_width = 18.0;
    let margin = 8.0;
    let content_left = margin + stub_width;
    let content_right = w - margin - stub_width;

    let (doc, page, layer) = PdfDocument::new("Talón de participación", Mm(w), Mm(h), "Talon");
    let layer = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;

    let ticket_str = data.ticket.formatted();

    // Marco exterior
    layer.set_outline_color(dark());
    layer.set_outline_thickness(1.1);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(margin), Mm(margin)), false),
            (Point::new(Mm(w - margin), Mm(margin)), false),
            (Point::new(Mm(w - margin), Mm(h - margin)), false),
            (Point::new(Mm(margin), Mm(h - margin)), false),
        ],
        is_closed: true,
    });

    // Líneas de perforación punteadas a ambos lados
    layer.set_outline_color(gray());
    layer.set_line_dash_pattern(LineDashPattern {
        dash_1: Some(2),
        gap_1: Some(2),
        ..Default::default()
    });
    layer.add_line(straight_line(
        (content_left, margin + 2.0),
        (content_left, h - margin - 2.0),
    ));
    layer.add_line(straight_line(
        (content_right, margin + 2.0),
        (content_right, h - margin - 2.0),
    ));
    layer.set_line_dash_pattern(LineDashPattern::default());

    // Número en los talones laterales
    layer.set_fill_color(gray());
    rotated_text(
        &layer,
        &regular,
        &format!("#{ticket_str}"),
        9.0,
        Mm(margin + stub_width / 2.0),
        Mm(h / 2.0),
        90.0,
    );
    rotated_text(
        &layer,
        &regular,
        &format!("#{ticket_str}"),
        9.0,
        Mm(content_right + stub_width / 2.0),
        Mm(h / 2.0),
        -90.0,
    );

    // Título y marca
    layer.set_fill_color(black());
    let title = "Día de las Piedras";
    layer.use_text(
        title,
        16.0,
        centered_x(title, 16.0, center_x),
        Mm(h - (margin + 14.0)),
        &bold,
    );
    let subtitle = "Comprobante de participación";
    layer.use_text(
        subtitle,
        9.0,
        centered_x(subtitle, 9.0, center_x),
        Mm(h - (margin + 21.0)),
        &regular,
    );

    // Detalle decorativo (las estrellas del diseño no están en Helvetica)
    let stars = "* * *";
    layer.use_text(
        stars,
        10.0,
        centered_x(stars, 10.0, center_x),
        Mm(h - (margin + 28.0)),
        &regular,
    );

    // Número grande al centro
    let big_number = format!("#{ticket_str}");
    layer.use_text(
        &big_number,
        28.0,
        centered_x(&big_number, 28.0, center_x),
        Mm(h - (margin + 44.0)),
        &bold,
    );

    // Bloque de datos
    let block_top = margin + 54.0;
    let line_h = 6.0;
    let rows = [
        format!("Sorteo: {}", data.raffle_name),
        format!("Comercio: {}", data.comercio_name),
        format!("Participante: {}", data.participant_name),
        format!("Fecha: {}", data.date_str()),
    ];
    for (i, row) in rows.iter().enumerate() {
        layer.use_text(
            row,
            10.0,
            Mm(content_left + 4.0),
            Mm(h - (block_top + line_h * i as f32)),
            &regular,
        );
    }

    // Línea de cierre y pie
    layer.set_outline_color(gray());
    layer.set_outline_thickness(0.8);
    let closing_y = h - (block_top + line_h * 3.0 + 6.0);
    layer.add_line(straight_line(
        (content_left + 4.0, closing_y),
        (content_right - 4.0, closing_y),
    ));

    layer.set_fill_color(gray());
    let footer = "Conservá este comprobante. Buena suerte.";
    layer.use_text(
        footer,
        8.0,
        centered_x(footer, 8.0, center_x),
        Mm(margin + 6.0),
        &regular,
    );

    doc.save_to_bytes().map_err(pdf_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_data() -> TalonData {
        TalonData {
            raffle_name: "Sorteo Marzo 2026".to_string(),
            comercio_name: "Ferox SRL".to_string(),
            ticket: TicketNumber::Number(1),
            participant_name: "Juan Pérez".to_string(),
            participant_phone: "09 123 456".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_classic_talon_is_a_pdf() {
        let bytes = build_talon_pdf(&sample_data(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_broken_background_falls_back_to_classic() {
        let bytes = build_talon_pdf(&sample_data(), Some(b"esto no es un png")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_month_title_uses_uruguay_time() {
        let data = sample_data();
        assert_eq!(data.month_title(), "Sorteo de Marzo");

        // 01:00 UTC del 1.º de abril todavía es 31 de marzo en Montevideo
        let edge = TalonData {
            submitted_at: Utc.with_ymd_and_hms(2026, 4, 1, 1, 0, 0).unwrap(),
            ..sample_data()
        };
        assert_eq!(edge.month_title(), "Sorteo de Marzo");
    }

    #[test]
    fn test_date_str_format() {
        let data = sample_data();
        // 15:30 UTC = 12:30 en Montevideo (UTC-3)
        assert_eq!(data.date_str(), "14/03/2026, 12:30");
    }
}
