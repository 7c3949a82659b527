use super::escape_html;
use super::resolve::{HeaderVariant, IconPosition, ResolvedStyle};

/// Build a section header `<h2>` in the descriptor's chosen treatment.
pub(crate) fn section_header(style: &ResolvedStyle, icon: Option<&str>, label: &str) -> String {
    let base = format!(
        "font-family:{};font-size:{};font-weight:{};text-transform:{};color:{};\
         margin-bottom:1rem;display:inline-flex;align-items:center;gap:0.75rem",
        style.heading_font, style.heading_size, style.heading_weight, style.text_transform,
        style.accent,
    );

    let variant_css = match style.header_style {
        HeaderVariant::Underline => format!(
            "{base};border-bottom:3px solid {};padding-bottom:0.5rem",
            style.decoration
        ),
        HeaderVariant::Boxed => format!(
            "{base};border:2px solid {};padding:0.5rem 1rem;border-radius:{}",
            style.decoration, style.radius
        ),
        HeaderVariant::Pill => format!(
            "{base};background-color:{};color:{};padding:0.5rem 1.5rem;border-radius:50px",
            style.decoration, style.background
        ),
        HeaderVariant::Gradient => format!(
            "{base};background:linear-gradient(135deg, {}20 0%, transparent 100%);\
             padding:0.75rem 1.5rem;border-radius:{}",
            style.decoration, style.radius
        ),
        HeaderVariant::Bracket | HeaderVariant::Minimal => base,
    };

    let text = if style.header_style == HeaderVariant::Bracket {
        format!("[ {} ]", escape_html(label))
    } else {
        escape_html(label)
    };

    let icon_span = icon
        .filter(|i| !i.is_empty())
        .map(|i| {
            format!(
                "<span style=\"opacity:0.7;font-family:monospace\">{}</span>",
                escape_html(i)
            )
        })
        .unwrap_or_default();

    match style.icon_position {
        IconPosition::Before => format!("<h2 style=\"{variant_css}\">{icon_span}{text}</h2>"),
        IconPosition::After => format!("<h2 style=\"{variant_css}\">{text}{icon_span}</h2>"),
        IconPosition::None => format!("<h2 style=\"{variant_css}\">{text}</h2>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apf::{HeaderStyle, StyleDna};
    use crate::render::resolve::resolve;

    fn style_with(header: HeaderStyle) -> ResolvedStyle {
        resolve(&StyleDna {
            headers: Some(header),
            ..Default::default()
        })
    }

    #[test]
    fn bracket_variant_wraps_the_label() {
        let style = style_with(HeaderStyle {
            style: Some("bracket".into()),
            ..Default::default()
        });
        let html = section_header(&style, None, "Failures");
        assert!(html.contains("[ Failures ]"));
    }

    #[test]
    fn pill_variant_inverts_colors() {
        let style = style_with(HeaderStyle {
            style: Some("pill".into()),
            ..Default::default()
        });
        let html = section_header(&style, None, "Edge");
        assert!(html.contains("border-radius:50px"));
    }

    #[test]
    fn icon_lands_on_the_requested_side() {
        let style = style_with(HeaderStyle {
            icon_position: Some("after".into()),
            ..Default::default()
        });
        let html = section_header(&style, Some(">>"), "Edge");
        let icon_at = html.find("&gt;&gt;").unwrap();
        let label_at = html.find("Edge").unwrap();
        assert!(label_at < icon_at);
    }

    #[test]
    fn no_icon_position_omits_the_icon() {
        let style = style_with(HeaderStyle {
            icon_position: Some("none".into()),
            ..Default::default()
        });
        let html = section_header(&style, Some(">>"), "Edge");
        assert!(!html.contains("&gt;&gt;"));
    }

    #[test]
    fn labels_are_escaped() {
        let style = style_with(HeaderStyle::default());
        let html = section_header(&style, None, "<script>");
        assert!(html.contains("&lt;script&gt;"));
    }
}
