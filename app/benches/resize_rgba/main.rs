/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use criterion::{Criterion, criterion_group, criterion_main};
use pic_resample::{
    ImageSize, PixelType, ResizeMethod, ResizeParams, ResizeTier, Resizer, ResizerOptions,
    ThreadingPolicy,
};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType as FirPixelType, ResizeAlg, ResizeOptions};

const CHANNELS: usize = 4;
const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;

fn synthetic_image() -> Vec<u8> {
    (0..WIDTH * HEIGHT * CHANNELS)
        .map(|i| {
            let (x, y) = ((i / CHANNELS) % WIDTH, i / (CHANNELS * WIDTH));
            ((x * 7 + y * 3 + (i % CHANNELS) * 50) % 256) as u8
        })
        .collect()
}

fn bench_u8(c: &mut Criterion, src: &[u8], method: ResizeMethod, dst_size: ImageSize) {
    let params = ResizeParams::new(
        ImageSize::new(WIDTH, HEIGHT),
        dst_size,
        CHANNELS,
        PixelType::U8,
        method,
    );
    for tier in ResizeTier::available() {
        let mut resizer = Resizer::with_options(
            params,
            ResizerOptions {
                tier: Some(tier),
                threading_policy: ThreadingPolicy::Single,
            },
        )
        .unwrap();
        let mut dst = vec![0u8; dst_size.width * dst_size.height * CHANNELS];
        c.bench_function(
            &format!(
                "Pic resample RGBA {:?} {}x{} {:?}",
                method,
                dst_size.width,
                dst_size.height,
                resizer.tier()
            ),
            |b| {
                b.iter(|| {
                    resizer
                        .run(src, WIDTH * CHANNELS, &mut dst, dst_size.width * CHANNELS)
                        .unwrap();
                })
            },
        );
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let src = synthetic_image();
    let quarter = ImageSize::new(WIDTH / 4, HEIGHT / 4);
    for method in [
        ResizeMethod::Nearest,
        ResizeMethod::Bilinear,
        ResizeMethod::Bicubic,
        ResizeMethod::Area,
    ] {
        bench_u8(c, &src, method, quarter);
    }
    bench_u8(c, &src, ResizeMethod::Bilinear, ImageSize::new(WIDTH * 3 / 2, HEIGHT * 3 / 2));

    let src_f32: Vec<f32> = src.iter().map(|&x| x as f32 / 255f32).collect();
    let params = ResizeParams::new(
        ImageSize::new(WIDTH, HEIGHT),
        quarter,
        CHANNELS,
        PixelType::F32,
        ResizeMethod::Bilinear,
    );
    let mut resizer = Resizer::new(params).unwrap();
    let mut dst_f32 = vec![0f32; quarter.width * quarter.height * CHANNELS];
    c.bench_function("Pic resample RGBA f32 Bilinear", |b| {
        b.iter(|| {
            resizer
                .run(&src_f32, WIDTH * CHANNELS, &mut dst_f32, quarter.width * CHANNELS)
                .unwrap();
        })
    });

    c.bench_function("Fast image resize RGBA8 w/o alpha: Bilinear", |b| {
        let src_image =
            Image::from_vec_u8(WIDTH as u32, HEIGHT as u32, src.clone(), FirPixelType::U8x4)
                .unwrap();
        let mut dst_image = Image::new(
            quarter.width as u32,
            quarter.height as u32,
            FirPixelType::U8x4,
        );
        let mut resizer = fast_image_resize::Resizer::new();
        let options = ResizeOptions::new()
            .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear))
            .use_alpha(false);
        b.iter(|| {
            resizer.resize(&src_image, &mut dst_image, &options).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
