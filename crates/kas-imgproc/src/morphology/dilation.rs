use std::ops::Range;

use kas_image::Image;

use super::{ClassificationSet, MorphologyError, StructuringElement};
use crate::parallel::{ExecuteRowBandsExt, ExecutionStrategy};

/// Grows the qualifying pixels of an image by a disk-shaped [`StructuringElement`].
///
/// Each row is walked left to right. At a qualifying pixel the scanner stamps the pixel's
/// color over the disk around it, skipping the offsets already stamped by the previous
/// qualifying pixel of the same row. The input image is never modified.
///
/// With [`ExecutionStrategy::AutoRows`] or [`ExecutionStrategy::Fixed`] the output is split
/// into bands of rows. Every band rescans the input rows within `radius` of it in the same
/// order as the serial scan, so all strategies produce the same image.
///
/// # Example
///
/// ```rust
/// use kas_image::{Image, ImageSize};
/// use kas_imgproc::morphology::{DilationScanner, StructuringElement};
/// use kas_imgproc::parallel::ExecutionStrategy;
///
/// let mut image = Image::<u8, 1>::from_size_val(ImageSize { width: 5, height: 5 }, 0);
/// image.set_pixel(2, 2, [255]).unwrap();
///
/// let element = StructuringElement::new(1, false).unwrap();
/// let scanner = DilationScanner::new(&element).with_strategy(ExecutionStrategy::AutoRows(2));
/// let dilated = scanner.dilate(&image, &[[0]], false).unwrap();
///
/// assert_eq!(dilated.get_pixel(2, 1), Some(&[255]));
/// assert_eq!(dilated.get_pixel(1, 1), Some(&[0]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DilationScanner<'a> {
    element: &'a StructuringElement,
    strategy: ExecutionStrategy,
}

impl<'a> DilationScanner<'a> {
    /// Create a serial scanner for a structuring element.
    pub fn new(element: &'a StructuringElement) -> Self {
        Self {
            element,
            strategy: ExecutionStrategy::Serial,
        }
    }

    /// Set the execution strategy used to split the output rows.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The structuring element of the scanner.
    pub fn element(&self) -> &'a StructuringElement {
        self.element
    }

    /// The execution strategy of the scanner.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Dilate the qualifying pixels of an image.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image.
    /// * `colors` - The background colors.
    /// * `dilate_background` - Dilate the background colors instead of everything else.
    ///
    /// # Returns
    ///
    /// A new image of the same size where every pixel reached by the disk of a qualifying
    /// pixel holds that pixel's color.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::InvalidOperation`] if the structuring element has zero
    /// radius, and [`MorphologyError::Parallel`] if the execution strategy is invalid.
    pub fn dilate<T, const C: usize>(
        &self,
        src: &Image<T, C>,
        colors: &[[T; C]],
        dilate_background: bool,
    ) -> Result<Image<T, C>, MorphologyError>
    where
        T: Copy + PartialEq + Send + Sync,
    {
        ensure_not_degenerate(self.element)?;
        self.strategy.validate()?;

        let class = ClassificationSet::new(colors, dilate_background);
        let element = self.element;

        let mut dst = src.clone();
        let row_stride = src.width() * C;
        dst.as_slice_mut()
            .execute_row_bands(self.strategy, row_stride, |rows, band| {
                scan_into_band(src, element, &class, rows, band, Stamp::Incremental);
            })?;

        Ok(dst)
    }
}

/// Dilate an image on the current thread.
///
/// Shorthand for [`DilationScanner::new`] followed by [`DilationScanner::dilate`].
pub fn dilate_disk<T, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    colors: &[[T; C]],
    dilate_background: bool,
) -> Result<Image<T, C>, MorphologyError>
where
    T: Copy + PartialEq + Send + Sync,
{
    DilationScanner::new(element).dilate(src, colors, dilate_background)
}

/// Dilate an image by stamping the whole disk at every qualifying pixel.
///
/// Pixels are visited in the same order as [`DilationScanner`], so when all qualifying
/// pixels share one color (binary images in particular) both produce the same image. This
/// is the reference the scanner is checked against.
///
/// # Errors
///
/// Returns [`MorphologyError::InvalidOperation`] if the structuring element has zero radius.
pub fn dilate_full_stamp<T, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    colors: &[[T; C]],
    dilate_background: bool,
) -> Result<Image<T, C>, MorphologyError>
where
    T: Copy + PartialEq,
{
    ensure_not_degenerate(element)?;

    let class = ClassificationSet::new(colors, dilate_background);
    let mut dst = src.clone();
    let rows = 0..src.height();
    scan_into_band(src, element, &class, rows, dst.as_slice_mut(), Stamp::Full);

    Ok(dst)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stamp {
    Incremental,
    Full,
}

fn ensure_not_degenerate(element: &StructuringElement) -> Result<(), MorphologyError> {
    if element.is_degenerate() {
        return Err(MorphologyError::InvalidOperation(
            "dilate called with a zero-radius structuring element".to_string(),
        ));
    }
    Ok(())
}

/// Scan the source rows that can reach `rows` and write into `band`, which holds the
/// output rows `rows` only.
fn scan_into_band<T: Copy + PartialEq, const C: usize>(
    src: &Image<T, C>,
    element: &StructuringElement,
    class: &ClassificationSet<'_, T, C>,
    rows: Range<usize>,
    band: &mut [T],
    stamp: Stamp,
) {
    let size = src.size();
    let width = size.width;
    let radius = element.radius() as usize;
    let scan_width = element.scan_width();

    let first = rows.start.saturating_sub(radius);
    let last = (rows.end + radius).min(src.height());

    let (band_top, band_bottom) = (rows.start as isize, rows.end as isize);

    for y in first..last {
        let mut gap = scan_width;
        for x in 0..width {
            gap = (gap + 1).min(scan_width);

            let Some(color) = src.get_pixel(x, y) else {
                continue;
            };
            if !class.qualifies(color) {
                continue;
            }

            let offsets = match stamp {
                Stamp::Incremental => element.offsets_for_gap(gap),
                Stamp::Full => element.schedule(),
            };

            for offset in offsets {
                let ty = y as isize + offset.dy as isize;
                let tx = x as isize + offset.dx as isize;
                if !size.contains(tx, ty) || ty < band_top || ty >= band_bottom {
                    continue;
                }
                let idx = ((ty - band_top) as usize * width + tx as usize) * C;
                band[idx..idx + C].copy_from_slice(color);
            }

            gap = 0;
        }
    }
}
