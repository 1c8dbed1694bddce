/// Splits pixel samples into the target class of a dilation call and everything else.
///
/// The `colors` list names the samples that count as background. With
/// `dilate_background == false` every sample outside the list qualifies (foreground
/// dilation); with `dilate_background == true` only samples in the list qualify.
///
/// # Example
///
/// ```rust
/// use kas_imgproc::morphology::ClassificationSet;
///
/// let background = [[0u8, 0, 0]];
/// let foreground = ClassificationSet::new(&background, false);
/// assert!(foreground.qualifies(&[255, 0, 0]));
/// assert!(!foreground.qualifies(&[0, 0, 0]));
///
/// let background_class = ClassificationSet::new(&background, true);
/// assert!(background_class.qualifies(&[0, 0, 0]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClassificationSet<'a, T, const C: usize> {
    colors: &'a [[T; C]],
    dilate_background: bool,
}

impl<'a, T: PartialEq, const C: usize> ClassificationSet<'a, T, C> {
    /// Create a classification from a list of background colors.
    pub fn new(colors: &'a [[T; C]], dilate_background: bool) -> Self {
        Self {
            colors,
            dilate_background,
        }
    }

    /// The background colors of the classification.
    pub fn colors(&self) -> &'a [[T; C]] {
        self.colors
    }

    /// Whether the background class is the one being dilated.
    pub fn dilate_background(&self) -> bool {
        self.dilate_background
    }

    /// Check whether a sample is one of the background colors.
    pub fn is_member(&self, sample: &[T; C]) -> bool {
        self.colors.iter().any(|color| color == sample)
    }

    /// Check whether a sample belongs to the class being dilated.
    #[inline]
    pub fn qualifies(&self, sample: &[T; C]) -> bool {
        self.is_member(sample) == self.dilate_background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let colors = [[0u8], [10u8]];
        let set = ClassificationSet::new(&colors, false);
        assert!(set.is_member(&[0]));
        assert!(set.is_member(&[10]));
        assert!(!set.is_member(&[5]));
        assert_eq!(set.colors().len(), 2);
    }

    #[test]
    fn test_qualifies_foreground() {
        let colors = [[0u8], [10u8]];
        let set = ClassificationSet::new(&colors, false);
        assert!(!set.dilate_background());
        assert!(set.qualifies(&[5]));
        assert!(!set.qualifies(&[10]));
    }

    #[test]
    fn test_qualifies_background() {
        let colors = [[0u8], [10u8]];
        let set = ClassificationSet::new(&colors, true);
        assert!(set.dilate_background());
        assert!(!set.qualifies(&[5]));
        assert!(set.qualifies(&[0]));
        assert!(set.qualifies(&[10]));
    }

    #[test]
    fn test_empty_set() {
        let colors: [[f32; 2]; 0] = [];
        let foreground = ClassificationSet::new(&colors, false);
        assert!(foreground.qualifies(&[0.0, 1.0]));
        let background = ClassificationSet::new(&colors, true);
        assert!(!background.qualifies(&[0.0, 1.0]));
    }
}
