use std::collections::BTreeMap;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use facetmesh::{AttributeTable, FacetMesh, FacetVertex, FACET_VERTEX_LAYOUT};
use serde::Serialize;
use tuning::MAX_DETAIL;

use crate::cli::MeshArgs;
use crate::paths::AppPaths;
use crate::settings::load_settings;

#[derive(Debug, Serialize)]
struct MeshDump {
    radius: f32,
    detail: u32,
    vertices: usize,
    triangles: usize,
    attributes: BTreeMap<String, AttributeDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shell: Option<ShellDump>,
}

#[derive(Debug, Serialize)]
struct AttributeDump {
    item_size: usize,
    data: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ShellDump {
    scale: f32,
    shares_attributes: bool,
    position: Vec<f32>,
}

pub fn run_mesh(args: MeshArgs, paths: &AppPaths) -> Result<()> {
    let settings = load_settings(args.config.as_deref(), paths)?;
    let radius = args.radius.unwrap_or(settings.mesh.radius);
    let detail = args.detail.unwrap_or(settings.mesh.detail);
    let shell_scale = args.shell_scale.or(settings.mesh.shell_scale);

    if !(radius > 0.0 && radius.is_finite()) {
        bail!("radius must be a positive number, got {radius}");
    }
    if detail > MAX_DETAIL {
        bail!("detail {detail} is too fine; expected 0..={MAX_DETAIL}");
    }
    if let Some(scale) = shell_scale {
        if !(scale > 0.0 && scale.is_finite()) {
            bail!("shell scale must be a positive number, got {scale}");
        }
    }

    let mesh = FacetMesh::icosphere(radius, detail);
    let shell = shell_scale.map(|scale| (scale, mesh.shell(scale)));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let mut table = AttributeTable::new();
        mesh.attach(&mut table);
        let attributes = table
            .names()
            .filter_map(|name| {
                table.get(name).map(|buffer| {
                    (
                        name.to_string(),
                        AttributeDump {
                            item_size: buffer.item_size,
                            data: buffer.data.clone(),
                        },
                    )
                })
            })
            .collect();
        let dump = MeshDump {
            radius,
            detail,
            vertices: mesh.base().vertex_count(),
            triangles: mesh.base().triangle_count(),
            attributes,
            shell: shell.as_ref().map(|(scale, shell)| ShellDump {
                scale: *scale,
                shares_attributes: shell.shares_attributes_with(&mesh),
                position: shell.base().to_flat(),
            }),
        };
        serde_json::to_writer(&mut out, &dump).context("failed to write mesh JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    let vertices = mesh.interleaved();
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    writeln!(out, "Icosphere radius={radius} detail={detail}")?;
    writeln!(out, "  vertices:  {}", mesh.base().vertex_count())?;
    writeln!(out, "  triangles: {}", mesh.base().triangle_count())?;
    writeln!(
        out,
        "  vertex buffer: {} bytes (stride {})",
        bytes.len(),
        FacetVertex::STRIDE
    )?;
    writeln!(out, "Attributes:")?;
    for attribute in FACET_VERTEX_LAYOUT {
        writeln!(
            out,
            "  @location({}) {:<11} vec{} offset={}",
            attribute.shader_location, attribute.name, attribute.components, attribute.offset
        )?;
    }
    if let Some(first) = vertices.first() {
        writeln!(
            out,
            "First triangle center: [{:.4}, {:.4}, {:.4}]",
            first.center[0], first.center[1], first.center[2]
        )?;
    }
    if let Some((scale, shell)) = &shell {
        writeln!(
            out,
            "Outline shell: scale={scale} vertices={} shared attributes={}",
            shell.base().vertex_count(),
            shell.shares_attributes_with(&mesh)
        )?;
    }
    Ok(())
}
