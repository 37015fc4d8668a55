use tracing::{debug, info, instrument};

use crate::model::theme::ThemeDocument;
use crate::render::{FontRequest, RenderTarget};

/// Generic families layered behind the requested font.
pub const FONT_FALLBACKS: &str = "system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif";
pub const FONT_WEIGHTS: [u16; 4] = [400, 600, 700, 800];
pub const FONT_VARIABLE: &str = "--font";

const FONT_SERVICE: &str = "https://fonts.googleapis.com/css2";

/// Write theme colors and font into the surface. Absent keys leave the
/// corresponding variables as they are, so applying twice is the same as once.
#[instrument(level = "info", skip_all)]
pub fn apply_theme<R: RenderTarget + ?Sized>(theme: Option<&ThemeDocument>, surface: &mut R) {
    let Some(theme) = theme else {
        debug!("No theme document; keeping page defaults");
        return;
    };

    for (name, value) in &theme.colors {
        surface.set_style_variable(&format!("--{}", name), value);
    }

    if let Some(font) = theme.font.as_deref().filter(|f| !f.trim().is_empty()) {
        surface.set_style_variable(FONT_VARIABLE, &font_stack(font));
        surface.request_font(FontRequest::for_family(font));
    }

    info!(colors = theme.colors.len(), font = theme.font.as_deref().unwrap_or("-"), "Applied theme");
}

/// CSS font-family value with the requested family first.
pub fn font_stack(font: &str) -> String {
    format!("'{}', {}", font, FONT_FALLBACKS)
}

impl FontRequest {
    pub fn for_family(family: &str) -> Self {
        let weights = FONT_WEIGHTS.to_vec();
        let weight_list = weights.iter().map(|w| w.to_string()).collect::<Vec<_>>().join(";");
        let stylesheet = format!(
            "{}?family={}:wght@{}&display=swap",
            FONT_SERVICE,
            encode_family(family),
            weight_list
        );
        Self { family: family.to_string(), weights, stylesheet }
    }
}

fn encode_family(family: &str) -> String {
    let mut out = String::with_capacity(family.len());
    for c in family.trim().chars() {
        match c {
            ' ' => out.push('+'),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", b));
                }
            }
        }
    }
    out
}
