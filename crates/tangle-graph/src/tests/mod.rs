mod smoke_tests;

#[cfg(feature = "proptest")]
mod property_tests;
