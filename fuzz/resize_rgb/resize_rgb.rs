#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pic_resample::{
    ImageSize, PixelType, ResizeMethod, ResizeParams, ResizeTier, Resizer, ResizerOptions,
};

#[derive(Arbitrary, Debug)]
struct Geometry {
    src_width: u16,
    src_height: u16,
    dst_width: u16,
    dst_height: u16,
    method: u8,
    seed: u8,
}

const CHANNELS: usize = 3;
const METHODS: &[ResizeMethod] = &[
    ResizeMethod::Nearest,
    ResizeMethod::NearestPytorch,
    ResizeMethod::Bilinear,
    ResizeMethod::Bicubic,
    ResizeMethod::Area,
    ResizeMethod::AreaFast,
];

fuzz_target!(|data: Geometry| {
    let (src_width, src_height) = (data.src_width as usize, data.src_height as usize);
    let (dst_width, dst_height) = (data.dst_width as usize, data.dst_height as usize);
    if src_width == 0
        || src_width > 600
        || src_height == 0
        || src_height > 600
        || dst_width == 0
        || dst_width > 512
        || dst_height == 0
        || dst_height > 512
    {
        return;
    }
    let method = METHODS[data.method as usize % METHODS.len()];
    let params = ResizeParams::new(
        ImageSize::new(src_width, src_height),
        ImageSize::new(dst_width, dst_height),
        CHANNELS,
        PixelType::U8,
        method,
    );

    let src: Vec<u8> = (0..src_width * src_height * CHANNELS)
        .map(|i| (i as u8).wrapping_mul(data.seed | 1))
        .collect();

    let mut reference: Option<Vec<u8>> = None;
    for tier in ResizeTier::available() {
        let mut resizer = Resizer::with_options(
            params,
            ResizerOptions {
                tier: Some(tier),
                ..Default::default()
            },
        )
        .unwrap();
        let mut dst = vec![<u8>::default(); dst_width * dst_height * CHANNELS];
        resizer
            .run(&src, src_width * CHANNELS, &mut dst, dst_width * CHANNELS)
            .unwrap();
        match &reference {
            None => reference = Some(dst),
            Some(reference) => assert!(
                reference
                    .iter()
                    .zip(dst.iter())
                    .all(|(a, b)| a.to_ne_bytes() == b.to_ne_bytes()),
                "{:?} differs from scalar on {:?}",
                tier,
                params
            ),
        }
    }
});
