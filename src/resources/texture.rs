use std::path::Path;

use crate::resources::{AssetError, load_binary};

/// Bind group layout shared by every lit pipeline: one colour texture and its sampler.
pub fn diffuse_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("diffuse_texture_bind_group_layout"),
    })
}

/// Reads and decodes an image from the asset directory. The format is guessed
/// from the file contents.
pub fn load_image(asset_dir: &Path, file_name: &str) -> Result<image::DynamicImage, AssetError> {
    let data = load_binary(asset_dir, file_name)?;
    Ok(image::load_from_memory(&data)?)
}
