//! End-to-end integration tests for the SIGIL protocol.
//!
//! These tests exercise the full identity lifecycle: key generation, meta
//! derivation, address encoding, identifier composition, verification
//! against the derived identity, and the interchange formats that carry
//! all of it between implementations.
//!
//! Each test stands alone. No shared state, no test ordering dependencies,
//! no flaky failures — everything here is a pure function of its inputs
//! plus the OS RNG for key generation.

use sigil_protocol::crypto::cipher::{AesKey, Cipher};
use sigil_protocol::crypto::keys::{Encryptor, RsaPrivateKey, Verifier};
use sigil_protocol::entity::{Account, Group, MetaSource, User};
use sigil_protocol::identity::{Address, Identifier, Meta, MetaVersion, NetworkType};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Mint a complete local identity: fresh key, meta, identifier, user.
fn mint_user(seed: &str, version: MetaVersion, network: NetworkType) -> (User, Meta) {
    let sk = RsaPrivateKey::generate(1024).expect("keygen");
    let meta = Meta::generate(&sk, seed, version).expect("meta derivation");
    let identifier = meta.build_id(network);
    (User::new(identifier, sk), meta)
}

// ---------------------------------------------------------------------------
// 1. Full Identity Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_identity_lifecycle() {
    // Create an identity from scratch.
    let sk = RsaPrivateKey::generate(1024).unwrap();
    let meta = Meta::generate(&sk, "moky", MetaVersion::Mkm).unwrap();
    let id = meta.build_id(NetworkType::Main);

    // The identifier carries the chosen name and a person-class address.
    assert_eq!(id.name(), Some("moky"));
    assert!(id.network().is_person());
    assert!(!id.is_broadcast());

    // The identity is self-certifying: the meta re-derives it.
    assert!(meta.matches_id(&id));
    assert!(meta.matches_key(&sk.public_key()));

    // The string form survives a roundtrip through parsing.
    let parsed: Identifier = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
    assert!(meta.matches_id(&parsed));

    // And the address alone survives its own roundtrip.
    let addr: Address = id.address().as_str().parse().unwrap();
    assert_eq!(&addr, id.address());
    assert_eq!(addr.check_number(), id.number());
}

// ---------------------------------------------------------------------------
// 2. Derivation Version Matrix
// ---------------------------------------------------------------------------

#[test]
fn version_matrix_name_and_address_rules() {
    let sk = RsaPrivateKey::generate(1024).unwrap();

    let mkm = Meta::generate(&sk, "moky", MetaVersion::Mkm).unwrap();
    let btc = Meta::generate(&sk, "moky", MetaVersion::Btc).unwrap();
    let ex_btc = Meta::generate(&sk, "moky", MetaVersion::ExBtc).unwrap();

    let mkm_id = mkm.build_id(NetworkType::Main);
    let btc_id = btc.build_id(NetworkType::Main);
    let ex_btc_id = ex_btc.build_id(NetworkType::Main);

    // Name rules: BTC is nameless, the others carry the seed.
    assert_eq!(mkm_id.name(), Some("moky"));
    assert_eq!(btc_id.name(), None);
    assert_eq!(ex_btc_id.name(), Some("moky"));

    // Address rules: BTC and ExBTC share the key-derived address, MKM's
    // is derived from the signature instead.
    assert_eq!(btc_id.address(), ex_btc_id.address());
    assert_ne!(mkm_id.address(), btc_id.address());

    // Every meta certifies its own identifier and nobody else's.
    assert!(mkm.matches_id(&mkm_id));
    assert!(btc.matches_id(&btc_id));
    assert!(ex_btc.matches_id(&ex_btc_id));
    assert!(!mkm.matches_id(&btc_id));
    assert!(!btc.matches_id(&mkm_id));
}

// ---------------------------------------------------------------------------
// 3. Deployed Vector Compatibility
// ---------------------------------------------------------------------------

#[test]
fn deployed_identifier_vectors() {
    // Two identifiers minted by an independent implementation of the
    // scheme. If these stop decoding, we broke wire compatibility.
    let moki: Identifier = "moki@4WDfe3zZ4T7opFSi3iDAKiuTnUHjxmXekk".parse().unwrap();
    let moky: Identifier = "moky@4DnqXWdTV8wuZgfqSCX9GjE2kNq7HJrUgQ".parse().unwrap();

    assert_eq!(moki.network(), NetworkType::Main);
    assert_eq!(moki.number(), 1840839527);
    assert_eq!(moky.network(), NetworkType::Main);
    assert_eq!(moky.number(), 4049699527);

    // Equality is (name, address): a fresh parse of the same string is
    // the same identity, the other identifier is not.
    let moky_again: Identifier = "moky@4DnqXWdTV8wuZgfqSCX9GjE2kNq7HJrUgQ".parse().unwrap();
    assert_eq!(moky, moky_again);
    assert_ne!(moky, moki);
}

// ---------------------------------------------------------------------------
// 4. Secure Message Exchange Between Identities
// ---------------------------------------------------------------------------

#[test]
fn secure_message_exchange() {
    let (alice, _) = mint_user("alice", MetaVersion::Mkm, NetworkType::Main);
    let (bob, bob_meta) = mint_user("bob", MetaVersion::Mkm, NetworkType::Main);

    // Alice learns Bob's identity, checks it against his meta, and keeps
    // his account around.
    let bob_account = bob.account();
    assert!(bob_account.certified_by(&bob_meta));

    // The payload travels under a fresh AES key; the AES key record
    // travels under Bob's RSA key. Standard hybrid dance.
    let payload = b"meet at the usual place, bring the ledger";
    let session = AesKey::generate(256).unwrap();
    let sealed_payload = session.encrypt(payload).unwrap();

    let key_record = serde_json::to_vec(&session).unwrap();
    let sealed_key = bob_account.public_key.encrypt(&key_record).unwrap();

    // Alice signs the ciphertext so Bob knows who sent it.
    let signature = alice.sign(&sealed_payload).unwrap();

    // Bob's side: unwrap the key, check the signature, read the payload.
    let key_record = bob.decrypt(&sealed_key).unwrap();
    let session: AesKey = serde_json::from_slice(&key_record).unwrap();

    assert!(alice.account().verify(&sealed_payload, &signature));
    assert_eq!(session.decrypt(&sealed_payload).unwrap(), payload);
}

// ---------------------------------------------------------------------------
// 5. Meta Interchange
// ---------------------------------------------------------------------------

#[test]
fn meta_survives_interchange() {
    // A meta serialized by one party must certify the same identifier
    // after a JSON roundtrip on the other side.
    let (user, meta) = mint_user("moky", MetaVersion::Mkm, NetworkType::Main);

    let wire = serde_json::to_string(&meta).unwrap();
    let received: Meta = serde_json::from_str(&wire).unwrap();

    assert_eq!(received, meta);
    assert!(received.matches_id(&user.identifier));
    assert!(received.matches_key(&user.public_key));

    // And the restored public key still verifies live signatures.
    let sig = user.sign(b"still me").unwrap();
    assert!(received.public_key().verify(b"still me", &sig));
}

// ---------------------------------------------------------------------------
// 6. Group Assembly
// ---------------------------------------------------------------------------

#[test]
fn group_assembly_and_broadcast() {
    let (founder, _) = mint_user("founder", MetaVersion::Mkm, NetworkType::Main);
    let (member, _) = mint_user("member", MetaVersion::Mkm, NetworkType::Main);

    // The group gets its own derived identity, group-classed.
    let sk = RsaPrivateKey::generate(1024).unwrap();
    let group_meta = Meta::generate(&sk, "roundtable", MetaVersion::Mkm).unwrap();
    let group_id = group_meta.build_id(NetworkType::Group);
    assert!(group_id.network().is_group());

    let mut group = Group::new(group_id.clone(), founder.identifier.clone());
    group.add_member(member.identifier.clone());
    assert!(group.is_founder(&founder.identifier));
    assert!(group.is_member(&member.identifier));
    assert!(group_meta.matches_id(&group.identifier));

    // Broadcast targets parse like any identifier but hit the reserved
    // constants instead of the codec.
    let everyone: Identifier = "everywhere".parse().unwrap();
    assert!(everyone.is_broadcast());
    assert!(everyone.network().is_group());
    assert_eq!(everyone.address(), Address::everywhere());
}

// ---------------------------------------------------------------------------
// 7. Meta Source Lookup
// ---------------------------------------------------------------------------

#[test]
fn meta_source_closes_the_loop() {
    use std::collections::HashMap;

    struct Directory(HashMap<Identifier, Meta>);

    impl MetaSource for Directory {
        fn meta(&self, identifier: &Identifier) -> Option<Meta> {
            self.0.get(identifier).cloned()
        }
    }

    let (user, meta) = mint_user("moky", MetaVersion::Mkm, NetworkType::Main);
    let directory = Directory(HashMap::from([(user.identifier.clone(), meta)]));

    // A third party resolves the identifier, fetches the meta, and
    // re-verifies the identity without ever talking to a registry.
    let claimed: Identifier = user.identifier.to_string().parse().unwrap();
    let fetched = directory.meta(&claimed).expect("directory hit");
    assert!(fetched.matches_id(&claimed));

    let account = Account::new(claimed, fetched.public_key().clone());
    let sig = user.sign(b"prove it").unwrap();
    assert!(account.verify(b"prove it", &sig));
}

// ---------------------------------------------------------------------------
// 8. Concurrent Derivation
// ---------------------------------------------------------------------------

#[test]
fn concurrent_derivation_is_coordination_free() {
    use std::thread;

    // Derivation is pure; the only shared resource is the OS RNG. Eight
    // threads minting identities concurrently must neither panic nor
    // collide.
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let seed = format!("worker-{i}");
                let (user, meta) = mint_user(&seed, MetaVersion::Mkm, NetworkType::Main);
                assert!(meta.matches_id(&user.identifier));
                user.identifier.address().as_str().to_string()
            })
        })
        .collect();

    let mut addresses: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("derivation thread panicked"))
        .collect();

    addresses.sort();
    addresses.dedup();
    assert_eq!(addresses.len(), 8, "all derived addresses must be distinct");
}

// ---------------------------------------------------------------------------
// 9. Terminal Routing Metadata
// ---------------------------------------------------------------------------

#[test]
fn terminals_route_without_changing_identity() {
    let (user, meta) = mint_user("moky", MetaVersion::Mkm, NetworkType::Main);

    let base = user.identifier.to_string();
    let at_home: Identifier = format!("{base}/home").parse().unwrap();
    let at_work: Identifier = format!("{base}/work").parse().unwrap();

    // Different devices, same entity, same certification.
    assert_eq!(at_home, at_work);
    assert_eq!(at_home, user.identifier);
    assert!(meta.matches_id(&at_home));
    assert_eq!(at_home.terminal(), Some("home"));
    assert_eq!(at_work.terminal(), Some("work"));
}

// ---------------------------------------------------------------------------
// 10. Station Identity
// ---------------------------------------------------------------------------

#[test]
fn station_identity_classification() {
    // Server nodes derive like any other entity; only the network byte
    // differs — and it makes them both communicators and things.
    let (station, meta) = mint_user("relay-1", MetaVersion::Mkm, NetworkType::Station);

    let nt = station.identifier.network();
    assert!(nt.is_station());
    assert!(nt.is_communicator());
    assert!(nt.is_thing());
    assert!(!nt.is_person());
    assert!(meta.matches_id(&station.identifier));
}
