use super::SceneFragments;

/// Reference geometry for formulas with no specialization: a slowly
/// turning torus knot whose hue drifts with time.
pub(super) const GENERIC: SceneFragments = SceneFragments {
    scene: r#"
  viz.knot = new THREE.Mesh(
    new THREE.TorusKnotGeometry(3, 0.8, 160, 24),
    new THREE.MeshPhongMaterial({ color: 0x667eea, emissive: 0x111133, shininess: 90 }));
  scene.add(viz.knot);
"#,
    update: r#"
  viz.knot.rotation.x = time * 0.3;
  viz.knot.rotation.y = time * 0.5;
  viz.knot.scale.setScalar(1 + 0.1 * Math.sin(time * 2));
  viz.knot.material.color.setHSL((time * 0.05) % 1, 0.6, 0.6);
"#,
};
