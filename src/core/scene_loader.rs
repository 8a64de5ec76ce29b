// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::camera::Camera;
use crate::core::material::Material;
use crate::core::scene::Scene;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::math::transform::Transform;
use crate::shapes::cube::Cube;
use crate::shapes::sphere::Sphere;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub trace_depth: Option<u32>,
    pub iterations: Option<u32>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let xml = fs::read_to_string(path.as_ref())?;
    parse_scene(&xml)
}

// Weight-style material record as it sits in the file. End-of-element
// classification turns it into one Material.
struct MaterialFields {
    id: Option<String>,
    color: Option<RGBSpectrum>,
    specular_color: Option<RGBSpectrum>,
    specular_exponent: Option<Float>,
    reflective: Option<Float>,
    refractive: Option<Float>,
    ior: Option<Float>,
    emittance: Option<Float>,
}

impl MaterialFields {
    fn reset(id: Option<String>) -> Self {
        Self {
            id,
            color: None,
            specular_color: None,
            specular_exponent: None,
            reflective: None,
            refractive: None,
            ior: None,
            emittance: None,
        }
    }

    fn classify(self) -> Result<(String, Material), SceneLoadError> {
        let id = self.id.ok_or(SceneLoadError::MissingField("material.id"))?;
        let material = Material::from_weights(
            self.color.unwrap_or_else(|| RGBSpectrum::splat(0.5)),
            self.specular_color.unwrap_or_else(RGBSpectrum::black),
            self.specular_exponent.unwrap_or(0.0),
            self.reflective.unwrap_or(0.0),
            self.refractive.unwrap_or(0.0),
            self.ior.unwrap_or(1.0),
            self.emittance.unwrap_or(0.0),
        );
        Ok((id, material))
    }
}

pub fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();

    let mut in_sensor = false;
    let mut in_film = false;
    let mut in_transform = false;
    let mut in_material = false;
    let mut in_shape = false;
    let mut in_shape_transform = false;
    let mut in_background = false;

    let mut fov_deg: Option<Float> = None;
    let mut origin: Option<Vector3f> = None;
    let mut target: Option<Vector3f> = None;
    let mut up: Option<Vector3f> = None;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut trace_depth: Option<u32> = None;
    let mut iterations: Option<u32> = None;

    let mut camera: Option<Camera> = None;
    let mut background: Option<RGBSpectrum> = None;
    let mut materials: Vec<(String, Material)> = Vec::new();
    let mut primitives: Vec<(Box<dyn Shape>, String)> = Vec::new();

    let mut current_material = MaterialFields::reset(None);

    let mut current_shape_type: Option<String> = None;
    let mut current_material_ref: Option<String> = None;
    let mut current_translate = Vector3f::new(0.0, 0.0, 0.0);
    let mut current_rotate = Vector3f::new(0.0, 0.0, 0.0);
    let mut current_scale = Vector3f::new(1.0, 1.0, 1.0);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.name().as_ref() {
                    b"default" => {
                        let mut key: Option<String> = None;
                        let mut value: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => key = Some(attr.unescape_value().unwrap_or_default().to_string()),
                                b"value" => value = Some(attr.unescape_value().unwrap_or_default().to_string()),
                                _ => {}
                            }
                        }
                        if let (Some(k), Some(v)) = (key, value) {
                            defaults.insert(k, v);
                        }
                    }
                    b"integrator" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"type" {
                                let integrator_type = resolve_value(&attr.unescape_value().unwrap_or_default(), &defaults);
                                if integrator_type != "path" {
                                    return Err(SceneLoadError::Parse(format!("unsupported integrator: {}", integrator_type)));
                                }
                            }
                        }
                    }
                    b"sensor" => {
                        let mut sensor_type: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"type" {
                                sensor_type = Some(resolve_value(&attr.unescape_value().unwrap_or_default(), &defaults));
                            }
                        }
                        in_sensor = matches!(sensor_type.as_deref(), Some("perspective"));
                    }
                    b"film" => {
                        if in_sensor {
                            in_film = true;
                        }
                    }
                    b"transform" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"name" {
                                let name = attr.unescape_value().unwrap_or_default();
                                if name.as_ref() == "to_world" {
                                    in_transform = in_sensor;
                                    in_shape_transform = in_shape;
                                }
                            }
                        }
                    }
                    b"lookat" => {
                        if in_sensor && in_transform {
                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"origin" => origin = Some(parse_vec3(&attr.unescape_value().unwrap_or_default())?),
                                    b"target" => target = Some(parse_vec3(&attr.unescape_value().unwrap_or_default())?),
                                    b"up" => up = Some(parse_vec3(&attr.unescape_value().unwrap_or_default())?),
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"translate" => {
                        if in_shape && in_shape_transform {
                            current_translate += parse_xyz(&e, &defaults, 0.0)?;
                        }
                    }
                    b"rotate" => {
                        // Euler angles in degrees.
                        if in_shape && in_shape_transform {
                            current_rotate = parse_xyz(&e, &defaults, 0.0)?;
                        }
                    }
                    b"scale" => {
                        if in_shape && in_shape_transform {
                            let mut uniform: Option<Float> = None;
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"value" {
                                    uniform = Some(parse_float(&resolve_value(&attr.unescape_value().unwrap_or_default(), &defaults))?);
                                }
                            }
                            let s = match uniform {
                                Some(u) => Vector3f::new(u, u, u),
                                None => parse_xyz(&e, &defaults, 1.0)?,
                            };
                            current_scale = current_scale.component_mul(&s);
                        }
                    }
                    b"float" => {
                        if let Some((name, value)) = name_value(&e, &defaults) {
                            if in_sensor && name == "fov" {
                                fov_deg = Some(parse_float(&value)?);
                            }
                            if in_material {
                                match name.as_str() {
                                    "specular_exponent" => current_material.specular_exponent = Some(parse_float(&value)?),
                                    "reflective" => current_material.reflective = Some(parse_float(&value)?),
                                    "refractive" => current_material.refractive = Some(parse_float(&value)?),
                                    "ior" => current_material.ior = Some(parse_float(&value)?),
                                    "emittance" => current_material.emittance = Some(parse_float(&value)?),
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"integer" => {
                        if let Some((name, value)) = name_value(&e, &defaults) {
                            if in_sensor && in_film {
                                if name == "width" {
                                    width = Some(parse_u32(&value)?);
                                } else if name == "height" {
                                    height = Some(parse_u32(&value)?);
                                }
                            }
                            if name == "max_depth" {
                                trace_depth = Some(parse_u32(&value)?);
                            }
                            if name == "sample_count" {
                                iterations = Some(parse_u32(&value)?);
                            }
                        }
                    }
                    b"rgb" => {
                        if let Some((name, value)) = name_value(&e, &defaults) {
                            if in_material {
                                match name.as_str() {
                                    "color" => current_material.color = Some(parse_vec3_spectrum(&value)?),
                                    "specular_color" => current_material.specular_color = Some(parse_vec3_spectrum(&value)?),
                                    _ => {}
                                }
                            }
                            if in_background && name == "radiance" {
                                background = Some(parse_vec3_spectrum(&value)?);
                            }
                        }
                    }
                    b"material" => {
                        let mut material_id: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"id" {
                                material_id = Some(attr.unescape_value().unwrap_or_default().to_string());
                            }
                        }
                        in_material = true;
                        current_material = MaterialFields::reset(material_id);
                    }
                    b"shape" => {
                        let mut shape_type: Option<String> = None;
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"type" {
                                shape_type = Some(resolve_value(&attr.unescape_value().unwrap_or_default(), &defaults));
                            }
                        }
                        in_shape = true;
                        current_shape_type = shape_type;
                        current_material_ref = None;
                        current_translate = Vector3f::new(0.0, 0.0, 0.0);
                        current_rotate = Vector3f::new(0.0, 0.0, 0.0);
                        current_scale = Vector3f::new(1.0, 1.0, 1.0);
                    }
                    b"ref" => {
                        if in_shape {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"id" {
                                    current_material_ref = Some(attr.unescape_value().unwrap_or_default().to_string());
                                }
                            }
                        }
                    }
                    b"background" => {
                        in_background = true;
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"sensor" => {
                        if in_sensor {
                            let fov_deg = fov_deg.ok_or(SceneLoadError::MissingField("sensor.fov"))?;
                            let origin = origin.ok_or(SceneLoadError::MissingField("sensor.origin"))?;
                            let target = target.ok_or(SceneLoadError::MissingField("sensor.target"))?;
                            let up = up.ok_or(SceneLoadError::MissingField("sensor.up"))?;
                            let width = width.ok_or(SceneLoadError::MissingField("film.width"))?;
                            let height = height.ok_or(SceneLoadError::MissingField("film.height"))?;

                            let fov_rad = fov_deg * std::f32::consts::PI / 180.0;
                            camera = Some(Camera::new(origin, target, up, fov_rad, width, height));
                        }
                        in_sensor = false;
                        in_film = false;
                        in_transform = false;
                    }
                    b"film" => {
                        in_film = false;
                    }
                    b"transform" => {
                        in_transform = false;
                        in_shape_transform = false;
                    }
                    b"material" => {
                        if in_material {
                            let fields = std::mem::replace(&mut current_material, MaterialFields::reset(None));
                            materials.push(fields.classify()?);
                        }
                        in_material = false;
                    }
                    b"shape" => {
                        if in_shape {
                            let shape_type = current_shape_type.take().ok_or(SceneLoadError::MissingField("shape.type"))?;
                            let material_ref = current_material_ref.take().ok_or(SceneLoadError::MissingField("shape.material_ref"))?;
                            let to_world = Transform::from_trs(current_translate, current_rotate, current_scale);

                            let shape: Box<dyn Shape> = match shape_type.as_str() {
                                "sphere" => Box::new(Sphere::new(to_world)),
                                "cube" => Box::new(Cube::new(to_world)),
                                other => {
                                    return Err(SceneLoadError::Parse(format!("unsupported shape: {}", other)));
                                }
                            };
                            primitives.push((shape, material_ref));
                        }
                        in_shape = false;
                    }
                    b"background" => {
                        in_background = false;
                    }
                    _ => {}
                }
            }
            Err(e) => {
                return Err(SceneLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    let camera = camera.ok_or(SceneLoadError::MissingField("sensor"))?;
    let mut scene = Scene::new(camera);
    if let Some(background) = background {
        scene.set_background(background);
    }

    let mut material_ids: HashMap<String, usize> = HashMap::new();
    for (name, material) in materials {
        let id = scene.add_material(material);
        material_ids.insert(name, id);
    }

    for (shape, material_ref) in primitives {
        let material_id = material_ids
            .get(&material_ref)
            .ok_or_else(|| SceneLoadError::Parse(format!("missing material ref: {}", material_ref)))?;
        scene.add_primitive(shape, *material_id);
    }

    Ok(SceneLoadResult { scene, trace_depth, iterations })
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn name_value(e: &quick_xml::events::BytesStart, defaults: &HashMap<String, String>) -> Option<(String, String)> {
    let mut name_attr: Option<String> = None;
    let mut value_attr: Option<String> = None;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"name" => name_attr = Some(attr.unescape_value().unwrap_or_default().to_string()),
            b"value" => value_attr = Some(resolve_value(&attr.unescape_value().unwrap_or_default(), defaults)),
            _ => {}
        }
    }
    match (name_attr, value_attr) {
        (Some(name), Some(value)) => Some((name, value)),
        _ => None,
    }
}

fn parse_xyz(e: &quick_xml::events::BytesStart, defaults: &HashMap<String, String>, missing: Float) -> Result<Vector3f, SceneLoadError> {
    let mut x = missing;
    let mut y = missing;
    let mut z = missing;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"x" => x = parse_float(&resolve_value(&attr.unescape_value().unwrap_or_default(), defaults))?,
            b"y" => y = parse_float(&resolve_value(&attr.unescape_value().unwrap_or_default(), defaults))?,
            b"z" => z = parse_float(&resolve_value(&attr.unescape_value().unwrap_or_default(), defaults))?,
            _ => {}
        }
    }
    Ok(Vector3f::new(x, y, z))
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

fn parse_vec3_spectrum(value: &str) -> Result<RGBSpectrum, SceneLoadError> {
    let v = parse_vec3(value)?;
    Ok(RGBSpectrum::new(v.x, v.y, v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_SCENE: &str = r#"
        <scene>
            <default name="spp" value="16"/>
            <integrator type="path">
                <integer name="max_depth" value="8"/>
                <integer name="sample_count" value="$spp"/>
            </integrator>
            <sensor type="perspective">
                <float name="fov" value="45"/>
                <transform name="to_world">
                    <lookat origin="0, 1, 6" target="0, 1, 0" up="0, 1, 0"/>
                </transform>
                <film>
                    <integer name="width" value="64"/>
                    <integer name="height" value="48"/>
                </film>
            </sensor>
            <background>
                <rgb name="radiance" value="0.1, 0.2, 0.3"/>
            </background>
            <material id="light">
                <rgb name="color" value="1, 1, 1"/>
                <float name="emittance" value="5"/>
            </material>
            <material id="glass">
                <rgb name="specular_color" value="0.95, 0.95, 0.95"/>
                <float name="refractive" value="1"/>
                <float name="ior" value="1.5"/>
            </material>
            <shape type="sphere">
                <ref id="glass"/>
                <transform name="to_world">
                    <translate x="0" y="1" z="0"/>
                    <scale value="2"/>
                </transform>
            </shape>
            <shape type="cube">
                <ref id="light"/>
                <transform name="to_world">
                    <translate x="0" y="4" z="0"/>
                    <rotate x="0" y="45" z="0"/>
                    <scale x="2" y="0.1" z="2"/>
                </transform>
            </shape>
        </scene>
    "#;

    #[test]
    fn test_parse_small_scene() {
        let result = parse_scene(SMALL_SCENE).unwrap();
        assert_eq!(result.trace_depth, Some(8));
        assert_eq!(result.iterations, Some(16));

        let scene = result.scene;
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.camera().width(), 64);
        assert_eq!(scene.camera().height(), 48);
        assert_eq!(scene.background(), RGBSpectrum::new(0.1, 0.2, 0.3));

        assert_eq!(scene.material(0).emission(), RGBSpectrum::splat(5.0));
        assert_eq!(
            *scene.material(1),
            Material::Refractive { transmittance: RGBSpectrum::new(0.95, 0.95, 0.95), ior: 1.5 }
        );
    }

    #[test]
    fn test_missing_sensor_is_reported() {
        assert!(matches!(
            parse_scene("<scene></scene>"),
            Err(SceneLoadError::MissingField("sensor"))
        ));
    }

    #[test]
    fn test_dangling_material_ref_is_reported() {
        let xml = r#"
            <scene>
                <sensor type="perspective">
                    <float name="fov" value="45"/>
                    <transform name="to_world">
                        <lookat origin="0, 0, 1" target="0, 0, 0" up="0, 1, 0"/>
                    </transform>
                    <film>
                        <integer name="width" value="8"/>
                        <integer name="height" value="8"/>
                    </film>
                </sensor>
                <shape type="sphere">
                    <ref id="nowhere"/>
                </shape>
            </scene>
        "#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_invalid_float_is_reported() {
        let xml = r#"
            <scene>
                <sensor type="perspective">
                    <float name="fov" value="wide"/>
                </sensor>
            </scene>
        "#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_unsupported_shape_is_reported() {
        let xml = r#"
            <scene>
                <sensor type="perspective">
                    <float name="fov" value="45"/>
                    <transform name="to_world">
                        <lookat origin="0, 0, 1" target="0, 0, 0" up="0, 1, 0"/>
                    </transform>
                    <film>
                        <integer name="width" value="8"/>
                        <integer name="height" value="8"/>
                    </film>
                </sensor>
                <material id="grey"/>
                <shape type="teapot">
                    <ref id="grey"/>
                </shape>
            </scene>
        "#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }
}
