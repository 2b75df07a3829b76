use crate::constants::*;

// Pure string builders for inline styles and SVG attributes. Kept free of
// web-sys so they can be tested on the host.

/// Format a number for CSS/SVG: no trailing `.0`, and never `-0`.
#[inline]
pub fn num(v: f32) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{}", v)
}

#[inline]
pub fn px(v: f32) -> String {
    format!("{}px", num(v))
}

#[inline]
pub fn translate3d(dx: f32, dy: f32) -> String {
    format!("translate3d({}, {}, 0)", px(dx), px(dy))
}

/// `values` attribute of a two-keyframe SVG `<animate>`.
#[inline]
pub fn keyframe_values(from: f32, to: f32) -> String {
    format!("{}; {}", num(from), num(to))
}

#[inline]
pub fn duration_secs(secs: f32) -> String {
    format!("{}s", num(secs))
}

#[inline]
pub fn filter_id(serial: u32) -> String {
    format!("{}{}", FILTER_ID_PREFIX, serial)
}

#[inline]
pub fn filter_url(id: &str) -> String {
    format!("url(#{})", id)
}

fn turbulence_layer(noise: &str, offset: &str, dy_values: &str) -> String {
    format!(
        concat!(
            r#"<feTurbulence type="turbulence" baseFrequency="{freq}" numOctaves="{oct}" seed="1" result="{noise}"/>"#,
            r#"<feOffset in="{noise}" dx="0" dy="0" result="{offset}">"#,
            r#"<animate attributeName="dy" values="{dy}" dur="6s" repeatCount="indefinite"/>"#,
            r#"<animate attributeName="dx" values="0; 0" dur="6s" repeatCount="indefinite"/>"#,
            r#"</feOffset>"#,
        ),
        freq = num(TURBULENCE_BASE_FREQUENCY),
        oct = TURBULENCE_OCTAVES,
        noise = noise,
        offset = offset,
        dy = dy_values,
    )
}

/// Hidden SVG holding the turbulence/displacement filter. Animation values
/// are placeholders until the first size measurement patches them.
pub fn filter_markup(id: &str) -> String {
    format!(
        concat!(
            r#"<svg aria-hidden="true" style="position:absolute;left:-9999px;top:-9999px;width:10px;height:10px;opacity:0.001;pointer-events:none">"#,
            r#"<defs><filter id="{id}" color-interpolation-filters="sRGB" x="{o}%" y="{o}%" width="{s}%" height="{s}%">"#,
            "{first}{second}",
            r#"<feDisplacementMap in="SourceGraphic" in2="offset1" scale="30" xChannelSelector="R" yChannelSelector="G"/>"#,
            r#"</filter></defs></svg>"#,
        ),
        id = id,
        o = FILTER_REGION_ORIGIN_PCT,
        s = FILTER_REGION_SIZE_PCT,
        first = turbulence_layer("noise1", "offset1", "700; 0"),
        second = turbulence_layer("noise2", "offset2", "0; -700"),
    )
}

/// Inline style for one stacked border layer.
pub fn border_layer_style(color: &str, thickness: f32, opacity: f32, blur_px: f32) -> String {
    let mut style = format!(
        "position:absolute;inset:0;border-radius:{};border:{} solid {};opacity:{};",
        BORDER_RADIUS,
        px(thickness),
        color,
        num(opacity)
    );
    if blur_px > 0.0 {
        style.push_str(&format!("filter:blur({});", px(blur_px)));
    }
    style
}

pub fn spotlight_style(radius: f32, color: &str, opacity: f32) -> String {
    format!(
        "pointer-events:none;position:absolute;border-radius:9999px;filter:blur({});width:{};height:{};background:{};opacity:{};transition:{};",
        px(SPOTLIGHT_BLUR_PX),
        px(radius),
        px(radius),
        color,
        num(opacity),
        SPOTLIGHT_FADE
    )
}
