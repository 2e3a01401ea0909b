use printpdf::{BuiltinFont, Color, Line, Mm, PdfDocument, Point, Rgb};
use qrcode::QrCode;
use url::Url;

use crate::error::{AppError, AppResult};

/// Módulos de zona muda alrededor del QR. El estándar recomienda 4; el cartel
/// impreso escanea bien con 1 y el diseño queda más compacto.
const QR_QUIET_MODULES: u32 = 1;

/// Tamaño del cartel. Cambia el tamaño del QR y los márgenes, nunca el
/// contenido del link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartelSize {
    A5,
    A6,
}

impl CartelSize {
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("a5") => Ok(CartelSize::A5),
            Some("a6") => Ok(CartelSize::A6),
            Some(other) => Err(AppError::ValidationError(format!(
                "Tamaño de cartel desconocido: {other}"
            ))),
        }
    }

    fn page_mm(self) -> (f32, f32) {
        match self {
            CartelSize::A5 => (148.0, 210.0),
            CartelSize::A6 => (105.0, 148.0),
        }
    }

    fn qr_mm(self) -> f32 {
        match self {
            CartelSize::A5 => 90.0,
            CartelSize::A6 => 62.0,
        }
    }

    fn padding_mm(self) -> f32 {
        match self {
            CartelSize::A5 => 14.0,
            CartelSize::A6 => 9.0,
        }
    }

    /// Lado del PNG del QR para impresión nítida (~300 dpi del lado físico).
    fn qr_px(self) -> u32 {
        match self {
            CartelSize::A5 => 1060,
            CartelSize::A6 => 730,
        }
    }
}

/// Link que codifica el QR: `<base-url>/participar?code=<secret_code>`.
pub fn participation_url(base_url: &str, secret_code: &str) -> AppResult<String> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::InternalError(format!("Invalid app base_url: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| AppError::InternalError("app base_url cannot be a base".to_string()))?
        .pop_if_empty()
        .push("participar");
    url.query_pairs_mut().append_pair("code", secret_code);

    Ok(url.to_string())
}

/// Matriz del QR como bitmap luma (0 = negro) ya escalado a `target_px`.
fn qr_bitmap(data: &str, target_px: u32) -> AppResult<(u32, Vec<u8>)> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::InternalError(format!("QR generation failed: {e}")))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let total_modules = modules + 2 * QR_QUIET_MODULES;
    let scale = (target_px / total_modules).max(1);
    let side = total_modules * scale;

    let mut pixels = vec![255u8; (side * side) as usize];
    for (idx, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let mx = idx as u32 % modules + QR_QUIET_MODULES;
            let my = idx as u32 / modules + QR_QUIET_MODULES;
            for dy in 0..scale {
                let row = (my * scale + dy) * side;
                let start = (row + mx * scale) as usize;
                for px in &mut pixels[start..start + scale as usize] {
                    *px = 0;
                }
            }
        }
    }

    Ok((side, pixels))
}

/// PNG del QR de participación (lo que se descarga desde el panel).
pub fn qr_png(data: &str, target_px: u32) -> AppResult<Vec<u8>> {
    let (side, pixels) = qr_bitmap(data, target_px)?;

    let img = image::GrayImage::from_raw(side, side, pixels)
        .ok_or_else(|| AppError::InternalError("QR buffer size mismatch".to_string()))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .map_err(|e| AppError::InternalError(format!("PNG encoding failed: {e}")))?;

    Ok(png)
}

fn pdf_err(e: printpdf::Error) -> AppError {
    AppError::InternalError(format!("PDF generation failed: {e}"))
}

// Misma aproximación de centrado que el talón.
fn centered_x(text: &str, font_size_pt: f32, center_mm: f32) -> Mm {
    let text_width_mm = text.chars().count() as f32 * font_size_pt * 0.5 * 0.3528;
    Mm(center_mm - text_width_mm / 2.0)
}

/// Cartel imprimible: una página por comercio (nombre, código). Para el
/// cartel individual se pasa un solo elemento; el "imprimir todos" del panel
/// manda todos los comercios activos.
pub fn build_cartel_pdf(
    comercios: &[(String, String)],
    size: CartelSize,
    base_url: &str,
) -> AppResult<Vec<u8>> {
    if comercios.is_empty() {
        return Err(AppError::ValidationError(
            "No hay comercios activos para generar carteles.".to_string(),
        ));
    }

    let (w, h) = size.page_mm();
    let padding = size.padding_mm();
    let qr_mm = size.qr_mm();

    let (doc, first_page, first_layer) =
        PdfDocument::new("Carteles de participación", Mm(w), Mm(h), "Cartel");

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;

    for (index, (name, secret_code)) in comercios.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(w), Mm(h), "Cartel");
            doc.get_page(page).get_layer(layer)
        };

        // Borde del cartel
        layer.set_outline_color(Color::Rgb(Rgb::new(0.82, 0.84, 0.86, None)));
        layer.set_outline_thickness(1.4);
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(padding), Mm(padding)), false),
                (Point::new(Mm(w - padding), Mm(padding)), false),
                (Point::new(Mm(w - padding), Mm(h - padding)), false),
                (Point::new(Mm(padding), Mm(h - padding)), false),
            ],
            is_closed: true,
        });

        // Marca arriba, nombre del comercio debajo
        layer.set_fill_color(Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)));
        let brand = "Día de Las Piedras";
        layer.use_text(
            brand,
            16.0,
            centered_x(brand, 16.0, w / 2.0),
            Mm(h - padding - 12.0),
            &bold,
        );
        layer.use_text(
            name.as_str(),
            12.0,
            centered_x(name, 12.0, w / 2.0),
            Mm(h - padding - 20.0),
            &regular,
        );

        // QR centrado
        let link = participation_url(base_url, secret_code)?;
        let (side_px, pixels) = qr_bitmap(&link, size.qr_px())?;
        let qr_image = printpdf::image_crate::GrayImage::from_raw(side_px, side_px, pixels)
            .ok_or_else(|| AppError::InternalError("QR buffer size mismatch".to_string()))?;
        let dynamic = printpdf::image_crate::DynamicImage::ImageLuma8(qr_image);

        let dpi = side_px as f32 * 25.4 / qr_mm;
        let qr_x = (w - qr_mm) / 2.0;
        let qr_y = (h - qr_mm) / 2.0 - 4.0;
        printpdf::Image::from_dynamic_image(&dynamic).add_to_layer(
            layer.clone(),
            printpdf::ImageTransform {
                translate_x: Some(Mm(qr_x)),
                translate_y: Some(Mm(qr_y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        // Llamado a la acción al pie
        let footer = "Escaneá y participá del sorteo";
        layer.use_text(
            footer,
            12.0,
            centered_x(footer, 12.0, w / 2.0),
            Mm(padding + 10.0),
            &regular,
        );
    }

    doc.save_to_bytes().map_err(pdf_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participation_url() {
        let url = participation_url("https://dialaspiedras.uy", "ABC123XYZ").unwrap();
        assert_eq!(url, "https://dialaspiedras.uy/participar?code=ABC123XYZ");
    }

    #[test]
    fn test_participation_url_with_trailing_slash_and_encoding() {
        let url = participation_url("https://dialaspiedras.uy/", "A&B C").unwrap();
        assert_eq!(url, "https://dialaspiedras.uy/participar?code=A%26B+C");
    }

    #[test]
    fn test_participation_url_rejects_garbage_base() {
        assert!(participation_url("no-es-una-url", "ABC").is_err());
    }

    #[test]
    fn test_qr_png_magic() {
        let png = qr_png("https://dialaspiedras.uy/participar?code=ABC", 400).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_cartel_sizes() {
        assert_eq!(CartelSize::parse(None).unwrap(), CartelSize::A5);
        assert_eq!(CartelSize::parse(Some("a6")).unwrap(), CartelSize::A6);
        assert_eq!(CartelSize::parse(Some("A5")).unwrap(), CartelSize::A5);
        assert!(CartelSize::parse(Some("carta")).is_err());
    }

    #[test]
    fn test_cartel_pdf_single_and_bulk() {
        let one = vec![("Ferox SRL".to_string(), "ABC123".to_string())];
        let bytes = build_cartel_pdf(&one, CartelSize::A5, "https://dialaspiedras.uy").unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let many = vec![
            ("Ferox SRL".to_string(), "ABC123".to_string()),
            ("La Esquina".to_string(), "XYZ789".to_string()),
        ];
        let bulk = build_cartel_pdf(&many, CartelSize::A6, "https://dialaspiedras.uy").unwrap();
        assert!(bulk.len() > bytes.len() / 2);
    }

    #[test]
    fn test_empty_comercio_list_is_rejected() {
        assert!(build_cartel_pdf(&[], CartelSize::A5, "https://dialaspiedras.uy").is_err());
    }
}
