use image::RgbImage;
use image::imageops::{self, FilterType};
use tract_onnx::prelude::*;

/// Side of the square image the network expects.
pub const INPUT_SIZE: usize = 224;

/// Batch, channels, height, width.
pub const INPUT_SHAPE: [usize; 4] = [1, 3, INPUT_SIZE, INPUT_SIZE];

/// Resampling used for the resize. Triangle is the bilinear filter.
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Turns a decoded image into the network input: exact 224x224 resize
/// (aspect ratio is not kept), channel-first f32 scaled to [0, 1], and a
/// leading batch axis. No mean/std normalization: the model was trained on
/// plain [0, 1] inputs.
pub fn to_input_tensor(image: &RgbImage) -> Tensor {
    let resized = imageops::resize(image, INPUT_SIZE as u32, INPUT_SIZE as u32, RESIZE_FILTER);
    tract_ndarray::Array4::from_shape_fn((1, 3, INPUT_SIZE, INPUT_SIZE), |(_, c, y, x)| {
        resized[(x as _, y as _)][c] as f32 / 255.0
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use image::Rgb;

    #[test]
    fn shape_and_type() {
        let tensor = to_input_tensor(&RgbImage::new(500, 300));
        assert_eq!(tensor.shape(), &INPUT_SHAPE);
        assert_eq!(tensor.datum_type(), f32::datum_type());
    }

    #[test]
    fn channels_first_and_scaled() {
        let image = RgbImage::from_pixel(640, 480, Rgb([255, 0, 51]));
        let tensor = to_input_tensor(&image);
        let view = tensor.to_array_view::<f32>().unwrap();
        for (y, x) in [(0, 0), (112, 17), (223, 223)] {
            assert_abs_diff_eq!(view[[0, 0, y, x]], 1.0, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(view[[0, 1, y, x]], 0.0, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(view[[0, 2, y, x]], 0.2, epsilon = 1.0 / 255.0);
        }
    }

    #[test]
    fn rows_and_columns_are_not_swapped() {
        // left half black, right half white
        let image =
            RgbImage::from_fn(448, 100, |x, _| if x < 224 { Rgb([0; 3]) } else { Rgb([255; 3]) });
        let tensor = to_input_tensor(&image);
        let view = tensor.to_array_view::<f32>().unwrap();
        assert!(view[[0, 0, 100, 10]] < 0.01);
        assert!(view[[0, 0, 100, 213]] > 0.99);
    }

    #[test]
    fn already_sized_image_is_kept_exactly() {
        let image = RgbImage::from_fn(224, 224, |x, y| Rgb([x as u8, y as u8, 7]));
        let tensor = to_input_tensor(&image);
        let view = tensor.to_array_view::<f32>().unwrap();
        assert_abs_diff_eq!(view[[0, 0, 3, 200]], 200.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view[[0, 1, 3, 200]], 3.0 / 255.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view[[0, 2, 3, 200]], 7.0 / 255.0, epsilon = 1e-6);
    }

    #[test]
    fn every_value_is_in_unit_range() {
        let image =
            RgbImage::from_fn(37, 913, |x, y| Rgb([(x * 7) as u8, (y * 3) as u8, (x ^ y) as u8]));
        let tensor = to_input_tensor(&image);
        assert!(tensor.as_slice::<f32>().unwrap().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
