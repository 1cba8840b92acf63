// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! The binary layer format: little-endian `u16` baked ids, row-major,
//! layers concatenated, no header. `0` means empty.

/// Serialize `layers` (each `width * height` baked ids, row-major) into the
/// on-disk binary format.
pub fn encode_layers(layers: &[Vec<u32>], width: i32, height: i32) -> Vec<u8> {
    let cells = (width.max(0) as usize) * (height.max(0) as usize);
    let mut out = Vec::with_capacity(layers.len() * cells * 2);
    for layer in layers {
        debug_assert_eq!(layer.len(), cells, "layer length must equal width*height");
        for &baked_id in layer {
            let value = u16::try_from(baked_id).unwrap_or(u16::MAX);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
    out
}

/// Inverse of [`encode_layers`]: split a binary blob back into
/// `layer_count` layers of `width * height` baked ids each.
pub fn decode_layers(bytes: &[u8], width: i32, height: i32, layer_count: usize) -> Vec<Vec<u32>> {
    let cells = (width.max(0) as usize) * (height.max(0) as usize);
    let mut layers = Vec::with_capacity(layer_count);
    let mut cursor = 0;
    for _ in 0..layer_count {
        let mut layer = Vec::with_capacity(cells);
        for _ in 0..cells {
            let value = u16::from_le_bytes([bytes[cursor], bytes[cursor + 1]]);
            layer.push(value as u32);
            cursor += 2;
        }
        layers.push(layer);
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_size_matches_layer_count_times_cells_times_two() {
        let layers = vec![vec![0u32; 100]; 9];
        let bytes = encode_layers(&layers, 10, 10, );
        assert_eq!(bytes.len(), 9 * 100 * 2);
    }

    #[test]
    fn roundtrips_through_decode() {
        let layers = vec![vec![0, 1, 2, 300], vec![7, 8, 9, 10]];
        let bytes = encode_layers(&layers, 2, 2);
        let back = decode_layers(&bytes, 2, 2, 2);
        assert_eq!(layers, back);
    }

    #[test]
    fn empty_cells_are_zero() {
        let layers = vec![vec![0u32; 4]];
        let bytes = encode_layers(&layers, 2, 2);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn is_little_endian() {
        let layers = vec![vec![0x0102u32]];
        let bytes = encode_layers(&layers, 1, 1);
        assert_eq!(bytes, vec![0x02, 0x01]);
    }
}
