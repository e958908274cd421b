//! Field scenes: radial and circulating arrow fields around sources, plus
//! the coupled gravitational/electromagnetic field families.

use super::SceneFragments;

pub(super) const SOLID_ANGLE_DENSITY: SceneFragments = SceneFragments {
    scene: r#"
  viz.mass = sphere(1, 0xff6b6b, 0x441111);
  viz.lines = new THREE.Group();
  scene.add(viz.lines);
  viz.lineCount = -1;
  viz.probe = new THREE.Mesh(
    new THREE.SphereGeometry(6, 32, 16),
    new THREE.MeshBasicMaterial({ color: 0x667eea, wireframe: true, transparent: true, opacity: 0.15 }));
  scene.add(viz.probe);
"#,
    update: r#"
  const n = Math.max(1, Math.round(param('lineCount', 120)));
  const k = param('k', 1);
  if (n !== viz.lineCount) {
    viz.lines.children.forEach(line => line.geometry.dispose());
    viz.lines.clear();
    const material = new THREE.LineBasicMaterial({ color: 0xffd166, transparent: true, opacity: 0.6 });
    const golden = Math.PI * (3 - Math.sqrt(5));
    for (let i = 0; i < n; i++) {
      const y = n === 1 ? 0 : 1 - (i / (n - 1)) * 2;
      const rad = Math.sqrt(1 - y * y);
      const dir = new THREE.Vector3(Math.cos(golden * i) * rad, y, Math.sin(golden * i) * rad);
      const geometry = new THREE.BufferGeometry().setFromPoints([
        dir.clone().multiplyScalar(1.2), dir.clone().multiplyScalar(9)]);
      viz.lines.add(new THREE.Line(geometry, material));
    }
    viz.lineCount = n;
  }
  viz.lines.rotation.y = time * 0.2;
  viz.mass.scale.setScalar(Math.cbrt(k) * (1 + 0.1 * Math.sin(time * 2)));
  viz.probe.scale.setScalar(0.8 + 0.2 * Math.sin(time));
"#,
};

pub(super) const VECTOR_FIELD: SceneFragments = SceneFragments {
    scene: r#"
  viz.mass = sphere(1, 0xff6b6b, 0x331111);
  viz.field = [];
  for (let x = -8; x <= 8; x += 4) {
    for (let y = -8; y <= 8; y += 4) {
      for (let z = -8; z <= 8; z += 4) {
        const origin = new THREE.Vector3(x, y, z);
        if (origin.length() < 2) continue;
        viz.field.push({ origin: origin, arrow: arrow(0x4ecdc4, origin) });
      }
    }
  }
  viz.probe = sphere(0.3, 0xffd166, 0x332200);
  viz.path = trail(0xffd166, 800);
"#,
    update: r#"
  const strength = param('G', 1) * param('k', 1);
  viz.field.forEach(cell => {
    const r = cell.origin.length();
    const g = cell.origin.clone().negate().normalize()
      .multiplyScalar(Math.min(strength * 40 / (r * r), 3));
    pointArrow(cell.arrow, g, 1);
  });

  const w = Math.sqrt(strength) * 0.8;
  const p = new THREE.Vector3(6 * Math.cos(w * time), 0, 6 * Math.sin(w * time));
  viz.probe.position.copy(p);
  if (isAnimating) pushTrail(viz.path, p);
  viz.mass.scale.setScalar(1 + 0.05 * Math.sin(time * 3));
"#,
};

pub(super) const CHARGE_FLUX: SceneFragments = SceneFragments {
    scene: r#"
  viz.core = sphere(0.8, 0x4cc9f0, 0x113344);
  viz.spokes = new THREE.Group();
  const material = new THREE.LineBasicMaterial({ color: 0x4cc9f0, transparent: true, opacity: 0.7 });
  const golden = Math.PI * (3 - Math.sqrt(5));
  for (let i = 0; i < 48; i++) {
    const y = 1 - (i / 47) * 2;
    const rad = Math.sqrt(1 - y * y);
    const dir = new THREE.Vector3(Math.cos(golden * i) * rad, y, Math.sin(golden * i) * rad);
    viz.spokes.add(new THREE.Line(
      new THREE.BufferGeometry().setFromPoints([dir.clone().multiplyScalar(1), dir.clone().multiplyScalar(6)]),
      material));
  }
  scene.add(viz.spokes);
  viz.ring = new THREE.Mesh(
    new THREE.TorusGeometry(7, 0.05, 8, 96),
    new THREE.MeshBasicMaterial({ color: 0xffd166 }));
  viz.ring.rotation.x = Math.PI / 2;
  scene.add(viz.ring);
  viz.spin = arrow(0xffd166);
"#,
    update: r#"
  const k = param('k', 1);
  const rate = param('omegaRate', 1);
  viz.spokes.rotation.y = time * rate;
  viz.spokes.scale.setScalar(0.6 + 0.4 * k);
  viz.core.material.color.setHex(rate >= 0 ? 0xef476f : 0x4cc9f0);
  viz.ring.rotation.z = time * rate;
  pointArrow(viz.spin, new THREE.Vector3(0, Math.sign(rate) || 1, 0), Math.abs(rate) * k * 2);
"#,
};

pub(super) const ELECTRIC_FIELD: SceneFragments = SceneFragments {
    scene: r#"
  viz.charge = sphere(0.8, 0xef476f, 0x330011);
  viz.field = [];
  const golden = Math.PI * (3 - Math.sqrt(5));
  [4, 8].forEach(radius => {
    for (let i = 0; i < 20; i++) {
      const y = 1 - (i / 19) * 2;
      const rad = Math.sqrt(1 - y * y);
      const dir = new THREE.Vector3(Math.cos(golden * i) * rad, y, Math.sin(golden * i) * rad);
      const origin = dir.clone().multiplyScalar(radius);
      viz.field.push({ dir: dir, r: radius, arrow: arrow(0xffd166, origin) });
    }
  });
  viz.test = sphere(0.25, 0x06d6a0, 0x003322);
"#,
    update: r#"
  const q = param('q', 1);
  const k = param('k', 1);
  viz.charge.material.color.setHex(q >= 0 ? 0xef476f : 0x4cc9f0);
  viz.charge.scale.setScalar(0.6 + 0.3 * Math.abs(q));
  viz.field.forEach(cell => {
    const magnitude = Math.min(k * Math.abs(q) * 20 / (cell.r * cell.r), 3)
      * (1 + 0.1 * Math.sin(time * 3 - cell.r));
    pointArrow(cell.arrow, cell.dir.clone().multiplyScalar(Math.sign(q) || 1), magnitude);
  });
  const drift = 3 + 3 * ((time * 0.3 * Math.abs(q) * k) % 1);
  const radius = q >= 0 ? drift : 9 - drift;
  viz.test.position.set(radius * Math.cos(0.7), 0.5, radius * Math.sin(0.7));
"#,
};

pub(super) const MAGNETIC_FIELD: SceneFragments = SceneFragments {
    scene: r#"
  viz.charge = sphere(0.5, 0xef476f, 0x330011);
  viz.velocity = arrow(0x06d6a0);
  viz.field = [];
  for (let i = 0; i < 36; i++) viz.field.push(arrow(0x4cc9f0));
  viz.path = trail(0xef476f, 400);
  viz.lastS = -Infinity;
"#,
    update: r#"
  const q = param('q', 1);
  const v = vec3('v', [1, 0, 0]);
  const speed = v.length();
  const dir = speed > 1e-9 ? v.clone().normalize() : new THREE.Vector3(1, 0, 0);
  const s = ((time * (speed * 3 + 0.2)) % 16) - 8;
  const pos = dir.clone().multiplyScalar(s);

  viz.charge.position.copy(pos);
  viz.charge.material.color.setHex(q >= 0 ? 0xef476f : 0x4cc9f0);
  viz.velocity.position.copy(pos);
  pointArrow(viz.velocity, v, 2);

  const side = Math.abs(dir.y) < 0.9 ? new THREE.Vector3(0, 1, 0) : new THREE.Vector3(1, 0, 0);
  const u = new THREE.Vector3().crossVectors(dir, side).normalize();
  const w = new THREE.Vector3().crossVectors(dir, u);
  viz.field.forEach((a, i) => {
    const r = 2 + Math.floor(i / 12) * 2;
    const th = (i % 12) / 12 * Math.PI * 2;
    const radial = u.clone().multiplyScalar(Math.cos(th)).addScaledVector(w, Math.sin(th));
    a.position.copy(pos).addScaledVector(radial, r);
    pointArrow(a, new THREE.Vector3().crossVectors(v, radial).multiplyScalar(q * 4 / (r * r)), 1);
  });

  if (s < viz.lastS) clearTrail(viz.path);
  viz.lastS = s;
  if (isAnimating) pushTrail(viz.path, pos);
"#,
};

/// An oscillating source radiating perpendicular field pairs along +x.
pub(super) const FIELD_COUPLING: SceneFragments = SceneFragments {
    scene: r#"
  viz.source = sphere(0.8, 0xff6b6b, 0x331111);
  viz.primary = [];
  viz.induced = [];
  for (let x = 1; x <= 13; x += 0.5) {
    const origin = new THREE.Vector3(x, 0, 0);
    viz.primary.push({ x: x, arrow: arrow(0xef476f, origin) });
    viz.induced.push({ x: x, arrow: arrow(0x4cc9f0, origin) });
  }
  const axis = new THREE.BufferGeometry().setFromPoints([
    new THREE.Vector3(0, 0, 0), new THREE.Vector3(14, 0, 0)]);
  scene.add(new THREE.Line(axis, new THREE.LineBasicMaterial({ color: 0x666688 })));
"#,
    update: r#"
  const f = param('f', 1);
  const omega = 2 * Math.PI * param('frequency', 1);
  const k = omega / 3;
  viz.primary.forEach(cell => {
    const e = f * 1.5 * Math.sin(k * cell.x - omega * time);
    pointArrow(cell.arrow, new THREE.Vector3(0, e, 0), 1);
  });
  viz.induced.forEach(cell => {
    const b = f * 1.5 * Math.sin(k * cell.x - omega * time);
    pointArrow(cell.arrow, new THREE.Vector3(0, 0, b), 1);
  });
  viz.source.scale.setScalar(1 + 0.3 * Math.sin(omega * time));
"#,
};

pub(super) const CURL_FIELD: SceneFragments = SceneFragments {
    scene: r#"
  viz.core = sphere(0.4, 0xffd166, 0x332200);
  viz.curl = arrow(0xffd166);
  viz.swirl = [];
  for (let ring = 0; ring < 4; ring++) {
    for (let i = 0; i < 16; i++) {
      viz.swirl.push({ r: 2 + ring * 2, th: i / 16 * Math.PI * 2, arrow: arrow(0x4cc9f0) });
    }
  }
"#,
    update: r#"
  const f = param('f', 1);
  const swirl = param('swirl', 1);
  viz.swirl.forEach(cell => {
    const th = cell.th + time * swirl * 0.3;
    cell.arrow.position.set(cell.r * Math.cos(th), 0, cell.r * Math.sin(th));
    const tangent = new THREE.Vector3(-Math.sin(th), 0, Math.cos(th));
    pointArrow(cell.arrow, tangent, f * swirl * cell.r * 0.15);
  });
  pointArrow(viz.curl, new THREE.Vector3(0, 1, 0), 4 * f * swirl);
  viz.core.scale.setScalar(1 + 0.2 * Math.sin(time * 2));
"#,
};

pub(super) const FIELD_INDUCTION: SceneFragments = SceneFragments {
    scene: r#"
  viz.mass = sphere(1, 0xff6b6b, 0x331111);
  viz.gravity = [];
  for (let i = 0; i < 12; i++) {
    const th = i / 12 * Math.PI * 2;
    const origin = new THREE.Vector3(3 * Math.cos(th), 0, 3 * Math.sin(th));
    viz.gravity.push({ dir: origin.clone().normalize(), arrow: arrow(0xff6b6b, origin) });
  }
  viz.electric = [];
  for (let i = 0; i < 16; i++) {
    const th = i / 16 * Math.PI * 2;
    const origin = new THREE.Vector3(6 * Math.cos(th), 0, 6 * Math.sin(th));
    viz.electric.push({ th: th, arrow: arrow(0x4cc9f0, origin) });
  }
"#,
    update: r#"
  const f = param('f', 1);
  const rate = param('rate', 1);
  const g = f * (1 + 0.5 * Math.sin(rate * time));
  const dg = f * 0.5 * rate * Math.cos(rate * time);
  viz.mass.scale.setScalar(Math.cbrt(g));
  viz.gravity.forEach(cell => pointArrow(cell.arrow, cell.dir.clone().negate(), g * 1.5));
  viz.electric.forEach(cell => {
    const tangent = new THREE.Vector3(-Math.sin(cell.th), 0, Math.cos(cell.th));
    pointArrow(cell.arrow, tangent.multiplyScalar(dg), 1.2);
  });
"#,
};
