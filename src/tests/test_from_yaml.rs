//! YAML robot description loading: the happy path, the deg() angle notation,
//! defaults, and the error taxonomy.

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::{JointKind, Parameters};
use std::f64::consts::PI;

const IRB120_YAML: &str = "
# ABB IRB 120
name: ABB IRB 120-3/0.6
links:
  - { d: 0.290, a: 0,     alpha: deg(90),  qlim: [deg(-165), deg(165)] }
  - { d: 0,     a: 0.270, alpha: 0,        offset: deg(90), qlim: [deg(-110), deg(110)] }
  - { d: 0,     a: 0.070, alpha: deg(90),  qlim: [deg(-110), deg(70)] }
  - { d: 0.302, a: 0,     alpha: deg(-90), qlim: [deg(-160), deg(160)] }
  - { d: 0,     a: 0,     alpha: deg(90),  qlim: [deg(-120), deg(120)] }
  - { d: 0.072, a: 0,     alpha: 0,        qlim: [deg(-400), deg(400)] }
";

#[test]
fn test_loads_irb120_description() {
    let parameters = Parameters::from_yaml(IRB120_YAML).expect("must parse");
    assert_eq!(parameters.name, "ABB IRB 120-3/0.6");

    let links = &parameters.links;
    assert_eq!(links[0].kind, JointKind::Revolute);
    assert!((links[0].d - 0.290).abs() < 1e-12);
    assert!((links[0].alpha - PI / 2.0).abs() < 1e-12);
    assert!((links[0].qlim[0] + 165.0_f64.to_radians()).abs() < 1e-12);

    assert!((links[1].offset - PI / 2.0).abs() < 1e-12);
    assert!((links[3].alpha + PI / 2.0).abs() < 1e-12);

    // offset not given defaults to zero, qlim to two full turns.
    assert_eq!(links[0].offset, 0.0);
}

#[test]
fn test_qlim_defaults_to_two_turns() {
    let yaml = "
name: minimal
links:
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0.2, alpha: 0 }
  - { d: 0, a: 0.1, alpha: 0 }
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0, alpha: 0 }
  - { d: 0.05, a: 0, alpha: 0 }
";
    let parameters = Parameters::from_yaml(yaml).expect("must parse");
    assert!((parameters.links[0].qlim[0] + 2.0 * PI).abs() < 1e-12);
    assert!((parameters.links[0].qlim[1] - 2.0 * PI).abs() < 1e-12);
}

#[test]
fn test_yaml_round_trip() {
    let original = Parameters::abb_irb120();
    let parsed = Parameters::from_yaml(&original.to_yaml()).expect("must parse");
    assert_eq!(parsed.name, original.name);
    for (a, b) in parsed.links.iter().zip(original.links.iter()) {
        assert!((a.d - b.d).abs() < 1e-12);
        assert!((a.a - b.a).abs() < 1e-12);
        // Angles go through the deg(...) notation with four decimals.
        assert!((a.alpha - b.alpha).abs() < 1e-4);
        assert!((a.offset - b.offset).abs() < 1e-4);
        assert!((a.qlim[0] - b.qlim[0]).abs() < 1e-4);
        assert!((a.qlim[1] - b.qlim[1]).abs() < 1e-4);
    }
}

#[test]
fn test_wrong_link_count_rejected() {
    let yaml = "
name: five links only
links:
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0.2, alpha: 0 }
  - { d: 0, a: 0.1, alpha: 0 }
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0, alpha: 0 }
";
    match Parameters::from_yaml(yaml) {
        Err(ParameterError::InvalidLength { expected, found }) => {
            assert_eq!(expected, 6);
            assert_eq!(found, 5);
        }
        other => panic!("expected InvalidLength, got {:?}", other.map(|p| p.name)),
    }
}

#[test]
fn test_missing_field_rejected() {
    let yaml = "
name: missing d
links:
  - { a: 0, alpha: 0 }
  - { d: 0, a: 0.2, alpha: 0 }
  - { d: 0, a: 0.1, alpha: 0 }
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0, alpha: 0 }
  - { d: 0.05, a: 0, alpha: 0 }
";
    assert!(matches!(
        Parameters::from_yaml(yaml),
        Err(ParameterError::MissingField(_))
    ));
}

#[test]
fn test_malformed_angle_rejected() {
    let yaml = "
name: bad angle
links:
  - { d: 0.1, a: 0, alpha: degrees(90) }
  - { d: 0, a: 0.2, alpha: 0 }
  - { d: 0, a: 0.1, alpha: 0 }
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0, alpha: 0 }
  - { d: 0.05, a: 0, alpha: 0 }
";
    assert!(matches!(
        Parameters::from_yaml(yaml),
        Err(ParameterError::WrongAngle(_))
    ));
}

#[test]
fn test_empty_qlim_range_rejected() {
    let yaml = "
name: inverted limits
links:
  - { d: 0.1, a: 0, alpha: 0, qlim: [deg(90), deg(-90)] }
  - { d: 0, a: 0.2, alpha: 0 }
  - { d: 0, a: 0.1, alpha: 0 }
  - { d: 0.1, a: 0, alpha: 0 }
  - { d: 0, a: 0, alpha: 0 }
  - { d: 0.05, a: 0, alpha: 0 }
";
    assert!(matches!(
        Parameters::from_yaml(yaml),
        Err(ParameterError::ParseError(_))
    ));
}
