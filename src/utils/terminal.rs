use qrcode::render::unicode;
use qrcode::QrCode;

/// Renders the QR code as unicode half-blocks for the terminal.
///
/// Terminals are usually dark, so the light-theme palette is inverted to
/// keep the symbol scannable; the dark-mode preference flips it back to the
/// natural dark-on-light orientation.
pub fn render_preview(code: &QrCode, dark_mode: bool) -> String {
    let rendered = if dark_mode {
        code.render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Dark)
            .light_color(unicode::Dense1x2::Light)
            .build()
    } else {
        code.render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build()
    };

    format!("\n{}\n", rendered)
}
