//! QR rendering for authenticator enrollment. The otpauth URL is turned into
//! an inline SVG data URL so the secret never leaves the page.

use base64::{Engine, engine::general_purpose::STANDARD};
use qrcode::{QrCode, render::svg};

/// Renders the given contents as an SVG QR code data URL. Returns `None` when
/// the contents cannot be encoded, in which case the caller falls back to
/// showing the secret as text.
pub fn qr_data_url(contents: &str) -> Option<String> {
    let code = QrCode::new(contents.as_bytes()).ok()?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .quiet_zone(true)
        .build();

    Some(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::STANDARD};

    #[test]
    fn renders_an_svg_data_url() {
        let url = qr_data_url("otpauth://totp/Compass:handler@example.com?secret=JBSWY3DPEHPK3PXP")
            .expect("encodable contents");

        let payload = url
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data url prefix");
        let decoded = STANDARD.decode(payload).expect("valid base64");
        let svg = String::from_utf8(decoded).expect("utf8 svg");
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn empty_contents_still_encode() {
        assert!(qr_data_url("").is_some());
    }
}
