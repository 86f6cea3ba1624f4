//! Supports extracting the Denavit-Hartenberg table from a YAML file (optional)

use std::path::Path;

use regex::Regex;
use yaml_rust2::{Yaml, YamlLoader};

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::{JointKind, Link, Parameters};
use std::f64::consts::PI;

impl Parameters {
    /// Read the robot description from a YAML file. A file like this is
    /// supported:
    /// ```yaml
    /// # ABB IRB 120
    /// name: ABB IRB 120-3/0.6
    /// links:
    ///   - { d: 0.290, a: 0,     alpha: deg(90),  qlim: [deg(-165), deg(165)] }
    ///   - { d: 0,     a: 0.270, alpha: 0,        offset: deg(90), qlim: [deg(-110), deg(110)] }
    ///   - { d: 0,     a: 0.070, alpha: deg(90),  qlim: [deg(-110), deg(70)] }
    ///   - { d: 0.302, a: 0,     alpha: deg(-90), qlim: [deg(-160), deg(160)] }
    ///   - { d: 0,     a: 0,     alpha: deg(90),  qlim: [deg(-120), deg(120)] }
    ///   - { d: 0.072, a: 0,     alpha: 0,        qlim: [deg(-400), deg(400)] }
    /// ```
    /// Angles are radians, or degrees inside the deg(...) marker. `offset`,
    /// `qlim` and `kind` (revolute / prismatic) are optional per link.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Read the robot description from a YAML string, see
    /// [Parameters::from_yaml_file] for the format.
    pub fn from_yaml(text: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(text)
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let doc = docs
            .first()
            .ok_or_else(|| ParameterError::ParseError("empty document".to_string()))?;

        let name = doc["name"]
            .as_str()
            .ok_or_else(|| ParameterError::MissingField("name".to_string()))?
            .to_string();

        let rows = doc["links"]
            .as_vec()
            .ok_or_else(|| ParameterError::MissingField("links".to_string()))?;
        if rows.len() != 6 {
            return Err(ParameterError::InvalidLength {
                expected: 6,
                found: rows.len(),
            });
        }

        let mut links: Vec<Link> = Vec::with_capacity(6);
        for (index, row) in rows.iter().enumerate() {
            links.push(parse_link(row, index)?);
        }

        Ok(Parameters {
            name,
            links: links
                .try_into()
                .map_err(|_| ParameterError::InvalidLength { expected: 6, found: 0 })?,
        })
    }
}

fn parse_link(row: &Yaml, index: usize) -> Result<Link, ParameterError> {
    let kind = match row["kind"].as_str() {
        None | Some("revolute") => JointKind::Revolute,
        Some("prismatic") => JointKind::Prismatic,
        Some(other) => {
            return Err(ParameterError::ParseError(format!(
                "links[{}].kind: unknown joint kind '{}'",
                index, other
            )));
        }
    };

    let d = number(&row["d"], &field(index, "d"))?;
    let a = number(&row["a"], &field(index, "a"))?;
    let alpha = angle(&row["alpha"], &field(index, "alpha"))?;

    let offset = match &row["offset"] {
        Yaml::BadValue => 0.0,
        value => angle(value, &field(index, "offset"))?,
    };

    let qlim = match &row["qlim"] {
        Yaml::BadValue => [-2.0 * PI, 2.0 * PI],
        value => {
            let pair = value
                .as_vec()
                .ok_or_else(|| ParameterError::ParseError(format!(
                    "links[{}].qlim must be a two element list",
                    index
                )))?;
            if pair.len() != 2 {
                return Err(ParameterError::InvalidLength {
                    expected: 2,
                    found: pair.len(),
                });
            }
            [
                angle(&pair[0], &field(index, "qlim[0]"))?,
                angle(&pair[1], &field(index, "qlim[1]"))?,
            ]
        }
    };

    let mut link = match kind {
        JointKind::Revolute => Link::revolute(d, a, alpha),
        JointKind::Prismatic => {
            let mut prismatic = Link::prismatic(a, alpha);
            prismatic.d = d;
            prismatic
        }
    };
    link.offset = offset;
    link.qlim = qlim;

    // A link that cannot move anywhere is a modelling mistake.
    if qlim[0] > qlim[1] {
        return Err(ParameterError::ParseError(format!(
            "links[{}].qlim is an empty range",
            index
        )));
    }
    Ok(link)
}

fn field(index: usize, name: &str) -> String {
    format!("links[{}].{}", index, name)
}

/// Plain numbers: YAML parses whole values as integers, fractions as reals.
fn number(value: &Yaml, field: &str) -> Result<f64, ParameterError> {
    match value {
        Yaml::Real(_) => value
            .as_f64()
            .ok_or_else(|| ParameterError::ParseError(format!("{}: bad number", field))),
        Yaml::Integer(int) => Ok(*int as f64),
        Yaml::BadValue => Err(ParameterError::MissingField(field.to_string())),
        _ => Err(ParameterError::ParseError(format!(
            "{}: expected a number",
            field
        ))),
    }
}

/// Angles: a plain number (radians) or the deg(...) marker (degrees).
fn angle(value: &Yaml, field: &str) -> Result<f64, ParameterError> {
    if let Yaml::String(text) = value {
        let pattern = Regex::new(r"^deg\(\s*(-?\d+(?:\.\d+)?)\s*\)$")
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let captures = pattern.captures(text.trim()).ok_or_else(|| {
            ParameterError::WrongAngle(format!("{}: '{}'", field, text))
        })?;
        let degrees: f64 = captures[1]
            .parse()
            .map_err(|_| ParameterError::WrongAngle(format!("{}: '{}'", field, text)))?;
        return Ok(degrees.to_radians());
    }
    number(value, field)
}
