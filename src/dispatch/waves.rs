use super::SceneFragments;

/// Transverse plane wave travelling along +x over a wireframe sheet.
pub(super) const SPACE_WAVE: SceneFragments = SceneFragments {
    scene: r#"
  const geometry = new THREE.PlaneGeometry(20, 20, 80, 80);
  geometry.rotateX(-Math.PI / 2);
  viz.surface = new THREE.Mesh(geometry, new THREE.MeshPhongMaterial({
    color: 0x118ab2, wireframe: true, transparent: true, opacity: 0.8 }));
  scene.add(viz.surface);
  viz.base = Float32Array.from(geometry.getAttribute('position').array);
  viz.crest = sphere(0.3, 0xffd166, 0x332200);
  viz.direction = arrow(0x06d6a0, new THREE.Vector3(-10, 4, 0));
"#,
    update: r#"
  const c = param('c', 2);
  const lambda = Math.max(param('wavelength', 3), 0.1);
  const amplitude = param('amplitude', 1);
  const k = 2 * Math.PI / lambda;
  const attr = viz.surface.geometry.getAttribute('position');
  for (let i = 0; i < attr.count; i++) {
    attr.array[i * 3 + 1] = amplitude * Math.sin(k * (viz.base[i * 3] - c * time));
  }
  attr.needsUpdate = true;
  viz.surface.geometry.computeVertexNormals();

  const crest = ((c * time + lambda / 4 + 10) % 20) - 10;
  viz.crest.position.set(crest, amplitude + 0.4, 0);
  pointArrow(viz.direction, new THREE.Vector3(1, 0, 0), c);
"#,
};

/// Expanding shells from a pulsing point source.
pub(super) const SPHERICAL_WAVE: SceneFragments = SceneFragments {
    scene: r#"
  viz.source = sphere(0.4, 0xffd166, 0x664400);
  viz.shells = [];
  for (let i = 0; i < 6; i++) {
    const shell = new THREE.Mesh(
      new THREE.SphereGeometry(1, 32, 16),
      new THREE.MeshBasicMaterial({ color: 0x4cc9f0, wireframe: true, transparent: true, opacity: 0.4 }));
    scene.add(shell);
    viz.shells.push(shell);
  }
"#,
    update: r#"
  const c = param('c', 2);
  const f = Math.max(param('frequency', 1), 0.05);
  const spacing = c / f;
  const maxR = 12;
  const cycle = viz.shells.length * spacing;
  viz.shells.forEach((shell, i) => {
    const r = (c * time + i * spacing) % cycle;
    shell.visible = r < maxR;
    shell.scale.setScalar(Math.max(r, 0.01));
    shell.material.opacity = 0.5 * Math.max(0, 1 - r / maxR);
  });
  viz.source.scale.setScalar(1 + 0.3 * Math.sin(2 * Math.PI * f * time));
"#,
};
