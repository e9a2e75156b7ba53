// THEORY:
// The `Pixel` module is the most fundamental unit of the detector. It is a "dumb"
// data container for a single RGBA sample plus the one heuristic the engine needs
// from a pixel in isolation: which color class it belongs to.
//
// Key architectural principles:
// 1.  **Single-pixel scope**: `classify` never looks at neighbors. Anything that
//     needs adjacency (connectivity, bounding boxes) lives in the region extractor.
// 2.  **Fixed thresholds**: A class is defined by one saturated channel (> 240) and
//     two dark channels (< 10). The ranges make the classes mutually exclusive.
// 3.  **Alpha is ignored**: It is carried so buffers round-trip, never consulted.

pub mod pixel {
    use crate::error::VisionError;
    use image::Rgba;
    use serde::Serialize;

    pub type Byte = u8;
    pub type Channel = Byte;

    pub const CHANNELS: usize = 4;

    /// A channel must be strictly above this to count as saturated.
    pub const SATURATED_ABOVE: Channel = 240;
    /// A channel must be strictly below this to count as dark.
    pub const DARK_BELOW: Channel = 10;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
        pub alpha: Channel,
    }

    /// The class a pixel's color falls into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ColorClass {
        None,
        /// Pure green.
        Marker,
        /// Pure red.
        PayloadA,
        /// Pure blue.
        PayloadB,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        pub fn rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel::new(red, green, blue, Channel::MAX)
        }

        /// Maps this pixel onto its color class. Pure, no state.
        pub fn classify(&self) -> ColorClass {
            classify(self)
        }
    }

    #[inline]
    fn saturated(channel: Channel) -> bool {
        channel > SATURATED_ABOVE
    }

    #[inline]
    fn dark(channel: Channel) -> bool {
        channel < DARK_BELOW
    }

    pub fn classify(pixel: &Pixel) -> ColorClass {
        let Pixel {
            red, green, blue, ..
        } = *pixel;

        if saturated(green) && dark(red) && dark(blue) {
            ColorClass::Marker
        } else if saturated(red) && dark(green) && dark(blue) {
            ColorClass::PayloadA
        } else if saturated(blue) && dark(red) && dark(green) {
            ColorClass::PayloadB
        } else {
            ColorClass::None
        }
    }

    impl TryFrom<&[Byte]> for Pixel {
        type Error = VisionError;

        /// Reads the first four bytes as RGBA. Three-byte slices are treated as opaque RGB.
        fn try_from(bytes: &[Byte]) -> Result<Self, Self::Error> {
            match bytes {
                [red, green, blue, alpha, ..] => Ok(Pixel::new(*red, *green, *blue, *alpha)),
                [red, green, blue] => Ok(Pixel::rgb(*red, *green, *blue)),
                _ => Err(VisionError::BufferSizeMismatch {
                    expected: CHANNELS,
                    actual: bytes.len(),
                }),
            }
        }
    }

    impl From<Rgba<Byte>> for Pixel {
        fn from(rgba: Rgba<Byte>) -> Self {
            let [red, green, blue, alpha] = rgba.0;
            Pixel::new(red, green, blue, alpha)
        }
    }

    impl From<Pixel> for Rgba<Byte> {
        fn from(pixel: Pixel) -> Self {
            Rgba([pixel.red, pixel.green, pixel.blue, pixel.alpha])
        }
    }
}
