use super::SceneFragments;

/// Relativistic mass growth: a body circling at `v` (fraction of light
/// speed) beside bars for rest and moving energy.
pub(super) const MASS_ENERGY: SceneFragments = SceneFragments {
    scene: r#"
  viz.body = sphere(0.6, 0xffd166, 0x442200);
  viz.limit = new THREE.Mesh(
    new THREE.TorusGeometry(8, 0.03, 8, 128),
    new THREE.MeshBasicMaterial({ color: 0x4cc9f0 }));
  viz.limit.rotation.x = Math.PI / 2;
  scene.add(viz.limit);
  const bar = (color) => {
    const mesh = new THREE.Mesh(new THREE.BoxGeometry(1, 1, 1),
      new THREE.MeshPhongMaterial({ color: color, transparent: true, opacity: 0.85 }));
    scene.add(mesh);
    return mesh;
  };
  viz.rest = bar(0x06d6a0);
  viz.energy = bar(0xef476f);
  viz.path = trail(0xffd166, 400);
"#,
    update: r#"
  const m0 = param('m0', 1);
  const beta = Math.min(Math.abs(param('v', 0.5)), 0.999);
  const gamma = 1 / Math.sqrt(1 - beta * beta);
  const m = m0 * gamma;
  const angle = time * beta * 2;
  const p = new THREE.Vector3(8 * Math.cos(angle), 0, 8 * Math.sin(angle));

  viz.body.position.copy(p);
  viz.body.scale.setScalar(Math.cbrt(m));
  viz.rest.scale.set(1, m0 * 2, 1);
  viz.rest.position.set(-12, m0, -1);
  viz.energy.scale.set(1, m * 2, 1);
  viz.energy.position.set(-12, m, 1);
  if (isAnimating) pushTrail(viz.path, p);
"#,
};

/// Balance between `G` and `c`, tilting away from the reference ratio.
pub(super) const CONSTANT_RELATION: SceneFragments = SceneFragments {
    scene: r#"
  viz.pivot = new THREE.Group();
  scene.add(viz.pivot);
  viz.beam = new THREE.Mesh(new THREE.BoxGeometry(12, 0.2, 0.4),
    new THREE.MeshPhongMaterial({ color: 0xa8dadc }));
  viz.pivot.add(viz.beam);
  viz.left = new THREE.Mesh(new THREE.SphereGeometry(1, 32, 16),
    new THREE.MeshPhongMaterial({ color: 0xff6b6b, emissive: 0x331111 }));
  viz.left.position.set(-6, 1, 0);
  viz.right = new THREE.Mesh(new THREE.SphereGeometry(1, 32, 16),
    new THREE.MeshPhongMaterial({ color: 0x4cc9f0, emissive: 0x113344 }));
  viz.right.position.set(6, 1, 0);
  viz.pivot.add(viz.left);
  viz.pivot.add(viz.right);
  viz.fulcrum = new THREE.Mesh(new THREE.ConeGeometry(0.6, 1.2, 4),
    new THREE.MeshPhongMaterial({ color: 0x666688 }));
  viz.fulcrum.position.set(0, -0.7, 0);
  scene.add(viz.fulcrum);
"#,
    update: r#"
  const G = param('G', 6.674);
  const c = param('c', 2.998);
  const tilt = Math.log(G / (c * c)) - Math.log(6.674 / (2.998 * 2.998));
  viz.pivot.rotation.z = Math.max(-0.6, Math.min(0.6, tilt * 0.5)) + 0.03 * Math.sin(time * 2);
  viz.pivot.rotation.y = time * 0.3;
  viz.left.scale.setScalar(Math.cbrt(G) / 1.5);
  viz.right.scale.setScalar(c / 2.5);
"#,
};
