//! Moving bodies: straight-line and helical spacetime motion, momentum,
//! force from changing mass, and light-speed propulsion.

use super::SceneFragments;

pub(super) const SPACETIME_VECTOR: SceneFragments = SceneFragments {
    scene: r#"
  viz.particle = sphere(0.5, 0x667eea, 0x223366);
  viz.position = arrow(0x06d6a0);
  viz.velocity = arrow(0xffd166);
  viz.path = trail(0x667eea, 600);
  viz.lastS = -Infinity;
"#,
    update: r#"
  const dir = vec3('C', [1, 0, 0]);
  const speed = param('speed', 1);
  const span = 12;
  const s = ((time * speed * 3) % (2 * span)) - span;
  const n = dir.lengthSq() > 1e-9 ? dir.clone().normalize() : new THREE.Vector3(1, 0, 0);
  const p = n.clone().multiplyScalar(s);

  viz.particle.position.copy(p);
  pointArrow(viz.position, p, 1);
  viz.velocity.position.copy(p);
  pointArrow(viz.velocity, dir, speed * 2);

  if (s < viz.lastS) clearTrail(viz.path);
  viz.lastS = s;
  if (isAnimating) pushTrail(viz.path, p);
"#,
};

pub(super) const HELIX_TRAJECTORY: SceneFragments = SceneFragments {
    scene: r#"
  viz.particle = sphere(0.4, 0xef476f, 0x330011);
  viz.radius = arrow(0x06d6a0);
  viz.tangent = arrow(0xffd166);
  viz.path = trail(0xef476f, 2000);
  viz.axis = arrow(0x8888aa, new THREE.Vector3(0, -10, 0));
  pointArrow(viz.axis, new THREE.Vector3(0, 20, 0), 1);
  viz.lastY = -Infinity;
"#,
    update: r#"
  const r = param('r', 5);
  const omega = param('omega', 1);
  const h = param('h', 0.5);
  const angle = omega * time * 2;
  const y = ((h * time * 2) % 20) - 10;
  const p = new THREE.Vector3(r * Math.cos(angle), y, r * Math.sin(angle));

  viz.particle.position.copy(p);
  viz.radius.position.set(0, y, 0);
  pointArrow(viz.radius, new THREE.Vector3(p.x, 0, p.z), 1);

  const tangent = new THREE.Vector3(-r * omega * Math.sin(angle), h, r * omega * Math.cos(angle));
  viz.tangent.position.copy(p);
  pointArrow(viz.tangent, tangent, 0.4);

  if (y < viz.lastY) clearTrail(viz.path);
  viz.lastY = y;
  if (isAnimating) pushTrail(viz.path, p);
"#,
};

/// Serves both the rest form (`m0`, `C0`) and the moving form (`m`, `C`, `V`).
pub(super) const MOMENTUM_VECTOR: SceneFragments = SceneFragments {
    scene: r#"
  viz.body = sphere(0.7, 0x118ab2, 0x0a2233);
  viz.c = arrow(0x4cc9f0);
  viz.v = arrow(0x06d6a0);
  viz.p = arrow(0xffd166);
  viz.path = trail(0x118ab2, 800);
  viz.lastS = -Infinity;
"#,
    update: r#"
  const m = param('m', param('m0', 1));
  const C = ('C' in params ? vec3('C', [0, 0, 1]) : vec3('C0', [0, 0, 1])).multiplyScalar(4);
  const V = vec3('V', [0, 0, 0]).multiplyScalar(4);

  C.applyAxisAngle(new THREE.Vector3(0, 1, 0), time);
  const s = V.lengthSq() > 1e-9 ? ((time * 0.5) % 4) - 2 : 0;
  const pos = V.clone().multiplyScalar(s);
  const momentum = C.clone().sub(V).multiplyScalar(m * 0.5);

  viz.body.position.copy(pos);
  viz.body.scale.setScalar(Math.cbrt(m));
  [viz.c, viz.v, viz.p].forEach(a => a.position.copy(pos));
  pointArrow(viz.c, C, 1);
  pointArrow(viz.v, V, 1);
  pointArrow(viz.p, momentum, 1);

  if (s < viz.lastS) clearTrail(viz.path);
  viz.lastS = s;
  if (isAnimating) pushTrail(viz.path, pos.clone().add(C));
"#,
};

pub(super) const UNIFIED_FORCE: SceneFragments = SceneFragments {
    scene: r#"
  viz.body = sphere(0.8, 0xef476f, 0x330011);
  viz.force = arrow(0xffd166);
  viz.seeds = [];
  const count = 300;
  const golden = Math.PI * (3 - Math.sqrt(5));
  for (let i = 0; i < count; i++) {
    const y = 1 - (i / (count - 1)) * 2;
    const rad = Math.sqrt(1 - y * y);
    const dir = new THREE.Vector3(Math.cos(golden * i) * rad, y, Math.sin(golden * i) * rad);
    viz.seeds.push({ dir: dir, phase: (i * 0.618034) % 1 });
  }
  const geometry = new THREE.BufferGeometry();
  geometry.setAttribute('position', new THREE.BufferAttribute(new Float32Array(count * 3), 3));
  viz.stream = new THREE.Points(geometry, new THREE.PointsMaterial({ color: 0x4cc9f0, size: 0.15 }));
  scene.add(viz.stream);
"#,
    update: r#"
  const rate = param('dmdt', 0.5);
  const speed = param('speed', 1);
  const attr = viz.stream.geometry.getAttribute('position');
  viz.seeds.forEach((seed, i) => {
    const r = 1 + 9 * (1 - ((seed.phase + time * speed * 0.3) % 1));
    attr.array[i * 3] = seed.dir.x * r;
    attr.array[i * 3 + 1] = seed.dir.y * r;
    attr.array[i * 3 + 2] = seed.dir.z * r;
  });
  attr.needsUpdate = true;
  viz.stream.visible = rate > 0;

  const mass = 1 + rate * (time % 5);
  viz.body.scale.setScalar(Math.cbrt(mass));
  pointArrow(viz.force, new THREE.Vector3(1, 0.3, 0), rate * speed * 3);
"#,
};

pub(super) const PROPULSION: SceneFragments = SceneFragments {
    scene: r#"
  viz.craft = new THREE.Mesh(
    new THREE.ConeGeometry(0.6, 2, 24),
    new THREE.MeshPhongMaterial({ color: 0xa8dadc, emissive: 0x112233 }));
  scene.add(viz.craft);
  viz.thrust = arrow(0xffd166);
  viz.velocity = arrow(0x06d6a0);
  viz.path = trail(0x06d6a0, 600);
  viz.seeds = [];
  const count = 200;
  for (let i = 0; i < count; i++) {
    const a = i * 2.399963;
    viz.seeds.push({ phase: (i * 0.618034) % 1, jx: Math.cos(a), jz: Math.sin(a) });
  }
  const geometry = new THREE.BufferGeometry();
  geometry.setAttribute('position', new THREE.BufferAttribute(new Float32Array(count * 3), 3));
  viz.exhaust = new THREE.Points(geometry, new THREE.PointsMaterial({ color: 0xff9f1c, size: 0.12 }));
  scene.add(viz.exhaust);
  viz.lastTravel = -Infinity;
"#,
    update: r#"
  const rate = param('dmdt', 0.5);
  const V = vec3('V', [0, 0, 0.3]);
  const dir = V.lengthSq() > 1e-9 ? V.clone().normalize() : new THREE.Vector3(0, 0, 1);
  const travel = ((time * (V.length() * 6 + 0.5)) % 20) - 10;
  const pos = dir.clone().multiplyScalar(travel);

  viz.craft.position.copy(pos);
  viz.craft.quaternion.setFromUnitVectors(new THREE.Vector3(0, 1, 0), dir);
  viz.thrust.position.copy(pos);
  pointArrow(viz.thrust, dir, rate * 3);
  viz.velocity.position.copy(pos);
  pointArrow(viz.velocity, V, 4);

  const side = Math.abs(dir.y) < 0.9 ? new THREE.Vector3(0, 1, 0) : new THREE.Vector3(1, 0, 0);
  const u = new THREE.Vector3().crossVectors(dir, side).normalize();
  const w = new THREE.Vector3().crossVectors(dir, u);
  const attr = viz.exhaust.geometry.getAttribute('position');
  viz.seeds.forEach((seed, i) => {
    const t = (seed.phase + time * 1.5) % 1;
    const p = pos.clone()
      .addScaledVector(dir, -(1 + t * 6))
      .addScaledVector(u, seed.jx * t * 0.8)
      .addScaledVector(w, seed.jz * t * 0.8);
    attr.array[i * 3] = p.x;
    attr.array[i * 3 + 1] = p.y;
    attr.array[i * 3 + 2] = p.z;
  });
  attr.needsUpdate = true;
  viz.exhaust.visible = rate > 0;

  if (travel < viz.lastTravel) clearTrail(viz.path);
  viz.lastTravel = travel;
  if (isAnimating) pushTrail(viz.path, pos);
"#,
};
