//! Text measurement

/// Measures the rendered width of a piece of text.
///
/// Implemented for any `Fn(&str) -> f64`, so a closure can be passed
/// wherever a measure is expected.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f64;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn measure(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Per-character advance widths
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f64>,
    /// Default width for non-ASCII characters
    pub default_width: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 8.41px for a 14px monospace char
        Self::monospace(8.41)
    }
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f64>, default_width: f64) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Every character has the same advance
    pub fn monospace(width: f64) -> Self {
        Self::new(vec![width; 128], width)
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f64 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, text: &str) -> f64 {
        text.chars().map(|c| self.width(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let metrics = FontMetrics::monospace(10.0);
        assert_eq!(metrics.measure("hyphen"), 60.0);
        assert_eq!(metrics.measure(""), 0.0);
        assert_eq!(metrics.measure("été"), 30.0);
    }

    #[test]
    fn test_proportional_widths() {
        let mut widths = vec![5.0; 128];
        widths['m' as usize] = 12.0;
        widths['i' as usize] = 3.0;
        let metrics = FontMetrics::new(widths, 7.0);
        assert_eq!(metrics.measure("mi"), 15.0);
        assert_eq!(metrics.measure("é"), 7.0);
    }

    #[test]
    fn test_closure_measure() {
        let measure = |s: &str| 10.0 * s.chars().count() as f64;
        assert_eq!(measure.measure("abc"), 30.0);
    }
}
