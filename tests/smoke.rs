//! Basic smoke test to verify crate compiles.

#[test]
fn crate_compiles() {
    // If this test runs, the public API surface is in place.
    let _ = std::any::type_name::<licensekey::ArmorConfig>();
    let _ = std::any::type_name::<licensekey::LicenseError>();
    let _ = std::any::type_name::<licensekey::Issuer<'static>>();
    let _ = std::any::type_name::<licensekey::Verifier<'static>>();
}

#[test]
fn issuer_and_verifier_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<licensekey::PrivateKey>();
    assert_send_sync::<licensekey::PublicKey>();
    assert_send_sync::<licensekey::Issuer<'static>>();
    assert_send_sync::<licensekey::Verifier<'static>>();
    assert_send_sync::<licensekey::Payload>();
}
