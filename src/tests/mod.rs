mod test_utils;

mod test_forward;
mod test_inverse;
mod test_trajectory;

#[cfg(feature = "allow_filesystem")]
mod test_from_yaml;
