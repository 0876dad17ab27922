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
use std::time::Instant;

use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType as FirPixelType, ResizeAlg, ResizeOptions};
use image::{EncodableLayout, GenericImageView, ImageReader};
use pic_resample::{
    ImageSize, PixelType, ResizeMethod, ResizeParams, ResizeTier, Resizer, ResizerOptions,
    ThreadingPolicy,
};

fn parse_method(name: &str) -> Option<ResizeMethod> {
    match name {
        "nearest" => Some(ResizeMethod::Nearest),
        "nearest-pytorch" => Some(ResizeMethod::NearestPytorch),
        "bilinear" => Some(ResizeMethod::Bilinear),
        "bicubic" => Some(ResizeMethod::Bicubic),
        "area" => Some(ResizeMethod::Area),
        "area-fast" => Some(ResizeMethod::AreaFast),
        _ => None,
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("usage: app <input> <output> [method] [width] [height]");
        return;
    }
    let method = args
        .get(3)
        .map(|x| parse_method(x).expect("unknown method"))
        .unwrap_or_default();

    let img = ImageReader::open(&args[1]).unwrap().decode().unwrap();
    let dimensions = img.dimensions();
    let transient = img.to_rgba8();
    let bytes = transient.as_bytes();

    let src_size = ImageSize::new(dimensions.0 as usize, dimensions.1 as usize);
    let dst_size = ImageSize::new(
        args.get(4)
            .map(|x| x.parse().unwrap())
            .unwrap_or(src_size.width / 2),
        args.get(5)
            .map(|x| x.parse().unwrap())
            .unwrap_or(src_size.height / 2),
    );
    let params = ResizeParams::new(src_size, dst_size, 4, PixelType::U8, method);
    let mut dst = vec![0u8; dst_size.width * dst_size.height * 4];

    for tier in ResizeTier::available() {
        let mut resizer = Resizer::with_options(
            params,
            ResizerOptions {
                tier: Some(tier),
                threading_policy: ThreadingPolicy::Single,
            },
        )
        .unwrap();
        let start_time = Instant::now();
        resizer
            .run(bytes, src_size.width * 4, &mut dst, dst_size.width * 4)
            .unwrap();
        println!("{:?} on {:?}: {:.2?}", method, resizer.tier(), start_time.elapsed());
    }

    let mut resizer = Resizer::with_options(
        params,
        ResizerOptions {
            tier: None,
            threading_policy: ThreadingPolicy::Adaptive,
        },
    )
    .unwrap();
    let start_time = Instant::now();
    resizer
        .run(bytes, src_size.width * 4, &mut dst, dst_size.width * 4)
        .unwrap();
    println!("{:?} adaptive threading: {:.2?}", method, start_time.elapsed());

    if method == ResizeMethod::Bilinear {
        let src_image =
            Image::from_vec_u8(dimensions.0, dimensions.1, bytes.to_vec(), FirPixelType::U8x4)
                .unwrap();
        let mut dst_image = Image::new(
            dst_size.width as u32,
            dst_size.height as u32,
            FirPixelType::U8x4,
        );
        let mut fir = fast_image_resize::Resizer::new();
        let start_time = Instant::now();
        fir.resize(
            &src_image,
            &mut dst_image,
            &ResizeOptions::new()
                .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear))
                .use_alpha(false),
        )
        .unwrap();
        println!("fast_image_resize bilinear: {:.2?}", start_time.elapsed());
    }

    image::save_buffer(
        &args[2],
        &dst,
        dst_size.width as u32,
        dst_size.height as u32,
        image::ColorType::Rgba8,
    )
    .unwrap();
}
