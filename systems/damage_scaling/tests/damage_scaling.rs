use better_turrets_core::{Command, DamageEvent, EntityId, Origin, TurretItem};
use better_turrets_system_damage_scaling::{DamageScalingPolicy, DamageTuning};
use better_turrets_world::{self as world, query, World};

const OWNER: u32 = 1;
const BYSTANDER: u32 = 2;
const ZOMBIE: u32 = 50;
const OTHER_ZOMBIE: u32 = 51;

fn id(value: u32) -> EntityId {
    EntityId::new(value)
}

fn world_with(perk_level: u32, turrets: u32) -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    let mut commands = vec![
        Command::SpawnController {
            id: id(OWNER),
            perk_level,
            remote: false,
        },
        Command::SpawnController {
            id: id(BYSTANDER),
            perk_level: 10,
            remote: false,
        },
        Command::SpawnCreature { id: id(ZOMBIE) },
        Command::SpawnCreature {
            id: id(OTHER_ZOMBIE),
        },
    ];
    for index in 0..turrets {
        commands.push(Command::SpawnTurret {
            id: id(100 + index),
            owner: id(OWNER),
            ammo: 30,
            base_capacity: 60,
            item: TurretItem::default(),
            remote: false,
        });
    }
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    world
}

fn hit(attacker: u32, victim: u32, raw_amount: i32, origin: Origin) -> DamageEvent {
    DamageEvent {
        attacker: id(attacker),
        victim: id(victim),
        raw_amount,
        origin,
    }
}

fn scaled(world: &World, policy: &DamageScalingPolicy, event: DamageEvent) -> i32 {
    let entities = query::entities(world);
    policy.scale(
        &event,
        &entities,
        |entity| query::descriptor(world, entity),
        |entity| query::perk_level(world, entity),
    )
}

#[test]
fn turret_hit_is_buffed_per_deployed_turret() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    let adjusted = scaled(&world, &policy, hit(100, ZOMBIE, 100, Origin::TrackedEntity));

    assert_eq!(adjusted, 175, "1.0 * (1 + 0.25 * 3) = 1.75");
}

#[test]
fn turret_item_hit_by_owner_is_buffed() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    let adjusted = scaled(&world, &policy, hit(OWNER, ZOMBIE, 100, Origin::TrackedItem));

    assert_eq!(adjusted, 175);
}

#[test]
fn owner_direct_hit_is_penalized_per_deployed_turret() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    let adjusted = scaled(&world, &policy, hit(OWNER, ZOMBIE, 100, Origin::Other));

    assert_eq!(adjusted, 25, "max(0, 1 - 0.25 * 3) = 0.25");
}

#[test]
fn owner_penalty_floors_at_zero() {
    let world = world_with(5, 5);
    let policy = DamageScalingPolicy::default();

    let adjusted = scaled(&world, &policy, hit(OWNER, ZOMBIE, 100, Origin::Other));

    assert_eq!(adjusted, 0, "penalty never heals");
}

#[test]
fn below_gate_level_damage_is_unchanged() {
    let world = world_with(4, 3);
    let policy = DamageScalingPolicy::default();

    for event in [
        hit(100, ZOMBIE, 100, Origin::TrackedEntity),
        hit(OWNER, ZOMBIE, 100, Origin::TrackedItem),
        hit(OWNER, ZOMBIE, 100, Origin::Other),
    ] {
        assert_eq!(scaled(&world, &policy, event), 100);
    }
}

#[test]
fn third_party_damage_is_unchanged() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(OTHER_ZOMBIE, OWNER, 100, Origin::Other)),
        100,
        "creatures have no perk progression"
    );
    assert_eq!(
        scaled(&world, &policy, hit(BYSTANDER, ZOMBIE, 100, Origin::Other)),
        100,
        "another controller's damage only depends on their own turrets"
    );
}

#[test]
fn no_deployed_turrets_leaves_damage_unchanged() {
    let world = world_with(5, 0);
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(OWNER, ZOMBIE, 100, Origin::Other)),
        100
    );
}

#[test]
fn non_positive_damage_is_passed_through() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    assert_eq!(scaled(&world, &policy, hit(OWNER, ZOMBIE, 0, Origin::Other)), 0);
    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, -7, Origin::TrackedEntity)),
        -7
    );
}

#[test]
fn unresolvable_participants_leave_damage_unchanged() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(999, ZOMBIE, 100, Origin::Other)),
        100,
        "unknown attacker"
    );
    assert_eq!(
        scaled(&world, &policy, hit(OWNER, 999, 100, Origin::Other)),
        100,
        "unknown victim"
    );
}

#[test]
fn orphaned_turret_damage_is_unchanged() {
    let mut world = world_with(5, 3);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::RemoveEntity { id: id(OWNER) },
        &mut events,
    );
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, 100, Origin::TrackedEntity)),
        100
    );
}

#[test]
fn dead_and_remote_turrets_do_not_count() {
    let mut world = world_with(5, 3);
    let mut events = Vec::new();
    world::apply(&mut world, Command::KillEntity { id: id(102) }, &mut events);
    world::apply(
        &mut world,
        Command::SpawnTurret {
            id: id(200),
            owner: id(OWNER),
            ammo: 0,
            base_capacity: 60,
            item: TurretItem::default(),
            remote: true,
        },
        &mut events,
    );
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, 100, Origin::TrackedEntity)),
        150,
        "only two turrets remain active"
    );
}

#[test]
fn fractional_results_round_down() {
    let world = world_with(5, 1);
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(OWNER, ZOMBIE, 7, Origin::Other)),
        5,
        "7 * 0.75 = 5.25"
    );
    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, 7, Origin::TrackedEntity)),
        8,
        "7 * 1.25 = 8.75"
    );
}

#[test]
fn configured_multipliers_are_honored() {
    let world = world_with(5, 3);
    let policy = DamageScalingPolicy::new(DamageTuning {
        base_multiplier: 2.0,
        per_deployed_bonus: 0.5,
        penalty_per_deployed: 0.125,
        gate_level: 5,
    });

    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, 100, Origin::TrackedEntity)),
        500
    );
    assert_eq!(
        scaled(&world, &policy, hit(OWNER, ZOMBIE, 100, Origin::Other)),
        62,
        "100 * (1 - 0.125 * 3) = 62.5"
    );
}

#[test]
fn huge_amounts_are_scaled_in_single_precision() {
    let world = world_with(5, 1);
    let policy = DamageScalingPolicy::default();

    assert_eq!(
        scaled(&world, &policy, hit(100, ZOMBIE, 16_777_217, Origin::TrackedEntity)),
        20_971_520,
        "16_777_217 rounds to 2^24 before the 1.25 multiplier"
    );
}
