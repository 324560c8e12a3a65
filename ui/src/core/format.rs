//! Formatting helpers for inline style values.

pub fn css_ms(value: u32) -> String {
    format!("{value}ms")
}

pub fn px(value: f64) -> String {
    // `-0` would otherwise print as "-0px".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}

pub fn translate_x(offset: f64) -> String {
    format!("translateX({})", px(offset))
}

pub fn translate_y(offset: f64) -> String {
    format!("translateY({})", px(offset))
}

/// `transform <duration> <easing>`
pub fn slide_transition(duration_ms: u32, easing: &str) -> String {
    format!("transform {} {easing}", css_ms(duration_ms))
}

/// Fade + lift transition with a start delay.
pub fn reveal_transition(duration_ms: u32, delay_ms: u32) -> String {
    let duration = css_ms(duration_ms);
    let delay = css_ms(delay_ms);
    format!("opacity {duration} ease {delay}, transform {duration} ease {delay}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_pixels_print_without_fraction() {
        assert_eq!(translate_x(-352.0), "translateX(-352px)");
        assert_eq!(translate_x(-0.0), "translateX(0px)");
        assert_eq!(translate_y(30.0), "translateY(30px)");
    }

    #[test]
    fn transitions() {
        assert_eq!(
            slide_transition(600, "ease-out"),
            "transform 600ms ease-out"
        );
        assert_eq!(
            reveal_transition(600, 300),
            "opacity 600ms ease 300ms, transform 600ms ease 300ms"
        );
    }
}
