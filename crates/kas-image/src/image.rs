use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use kas_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check whether a signed pixel coordinate lies inside the image.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored row-major in a contiguous buffer with shape (H, W, C), where
/// every pixel is a fixed-size sample of `CHANNELS` values of type `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kas_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.area() * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.area() * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image where every pixel holds the same sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use kas_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_pixel(
    ///     ImageSize {
    ///         width: 4,
    ///         height: 2,
    ///     },
    ///     [1, 2, 3],
    /// );
    ///
    /// assert_eq!(image.get_pixel(3, 1), Some(&[1, 2, 3]));
    /// ```
    pub fn from_size_pixel(size: ImageSize, pixel: [T; CHANNELS]) -> Self
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(size.area() * CHANNELS);
        for _ in 0..size.area() {
            data.extend_from_slice(&pixel);
        }
        Self { size, data }
    }

    /// Create a new image with the given size and every channel set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Self
    where
        T: Clone,
    {
        Self {
            size,
            data: vec![val; size.area() * CHANNELS],
        }
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the raw pixel data in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the raw pixel data in row-major order, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the samples of row `y`, `width * CHANNELS` values long.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height() {
            return None;
        }
        let stride = self.width() * CHANNELS;
        Some(&self.data[y * stride..(y + 1) * stride])
    }

    /// Get the sample of the pixel at column `x` and row `y`.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<&[T; CHANNELS]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y * self.width() + x) * CHANNELS;
        self.data[idx..idx + CHANNELS].try_into().ok()
    }

    /// Overwrite the sample of the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinate lies outside the image, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [T; CHANNELS]) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let idx = (y * self.width() + x) * CHANNELS;
        for (dst, src) in self.data[idx..idx + CHANNELS].iter_mut().zip(pixel) {
            *dst = src;
        }
        Ok(())
    }

    /// Count the pixels whose sample differs from the pixel at the same position in `other`.
    ///
    /// # Errors
    ///
    /// If the two images do not have the same size, an error is returned.
    pub fn count_diff(&self, other: &Self) -> Result<usize, ImageError>
    where
        T: PartialEq,
    {
        if self.size() != other.size() {
            return Err(ImageError::InvalidImageSize(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }

        let count = self
            .data
            .chunks_exact(CHANNELS.max(1))
            .zip(other.data.chunks_exact(CHANNELS.max(1)))
            .filter(|(a, b)| a != b)
            .count();

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.area(), 200);
        assert!(image_size.contains(9, 19));
        assert!(!image_size.contains(10, 0));
        assert!(!image_size.contains(0, -1));
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_shape() {
        let res = Image::<u8, 2>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 7],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(7, 8)));
    }

    #[test]
    fn image_pixels() -> Result<(), ImageError> {
        let mut image = Image::<u8, 2>::from_size_val([3, 2].into(), 0);
        image.set_pixel(2, 1, [7, 9])?;

        assert_eq!(image.get_pixel(2, 1), Some(&[7, 9]));
        assert_eq!(image.get_pixel(0, 0), Some(&[0, 0]));
        assert_eq!(image.get_pixel(3, 0), None);
        assert_eq!(image.row(1), Some(&[0u8, 0, 0, 0, 7, 9][..]));
        assert_eq!(
            image.set_pixel(0, 2, [1, 1]),
            Err(ImageError::PixelIndexOutOfBounds(0, 2, 3, 2))
        );

        Ok(())
    }

    #[test]
    fn image_count_diff() -> Result<(), ImageError> {
        let a = Image::<u8, 3>::from_size_pixel([4, 4].into(), [1, 2, 3]);
        let mut b = a.clone();
        b.set_pixel(0, 0, [1, 2, 4])?;
        b.set_pixel(3, 3, [0, 0, 0])?;
        assert_eq!(a.count_diff(&b)?, 2);

        let c = Image::<u8, 3>::from_size_pixel([4, 3].into(), [1, 2, 3]);
        assert!(a.count_diff(&c).is_err());

        Ok(())
    }
}
