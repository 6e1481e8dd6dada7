#[cfg(test)]
mod test_helpers;
