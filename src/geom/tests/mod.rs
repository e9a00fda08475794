mod test_curve_basic;
mod test_linear_basic;
