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

const CHANNELS: usize = 1;
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
                "Pic resample Plane {:?} {}x{} {:?}",
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
    let half = ImageSize::new(WIDTH / 2, HEIGHT / 2);
    for method in [
        ResizeMethod::Nearest,
        ResizeMethod::Bilinear,
        ResizeMethod::Bicubic,
        ResizeMethod::Area,
    ] {
        bench_u8(c, &src, method, half);
    }

    let src_u16: Vec<u16> = src.iter().map(|&x| (x as u16) << 8 | x as u16).collect();
    for method in [
        ResizeMethod::Bilinear,
        ResizeMethod::BilinearCaffe,
        ResizeMethod::BilinearPytorch,
    ] {
        let params = ResizeParams::new(
            ImageSize::new(WIDTH, HEIGHT),
            half,
            CHANNELS,
            PixelType::U16,
            method,
        );
        let mut resizer = Resizer::new(params).unwrap();
        let mut dst = vec![0u16; half.width * half.height * CHANNELS];
        c.bench_function(&format!("Pic resample Plane u16 {:?}", method), |b| {
            b.iter(|| {
                resizer
                    .run(&src_u16, WIDTH * CHANNELS, &mut dst, half.width * CHANNELS)
                    .unwrap();
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
