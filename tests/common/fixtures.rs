//! Static node log corpora used across harnesses.
//!
//! Lines are written the way the node prints them under `docker logs`:
//! tab-separated, timestamp first.

/// A node start-up, in order, as seen on a freshly started operator.
pub const CORPUS_STARTUP: &[&str] = &[
    "2024-05-01T10:00:00.001Z\tINFO\tsetting ssv network\t{\"network\":\"holesky\"}",
    "2024-05-01T10:00:00.002Z\tINFO\tapplying migrations\t{\"count\":3}",
    "2024-05-01T10:00:00.003Z\tINFO\tapplied migrations successfully",
    "2024-05-01T10:00:00.004Z\tINFO\tsuccessfully loaded operator keys\t{\"pubkey\":\"LS0tLS1CRUdJTiBSU0EgUFVCTElD\"}",
    "2024-05-01T10:00:00.005Z\tINFO\tconsensus client: connecting\t{\"address\":\"http://beacon:5052\"}",
    "2024-05-01T10:00:00.006Z\tINFO\twaiting until nodes are healthy",
    "2024-05-01T10:00:00.007Z\tINFO\tethereum node(s) are healthy",
    "2024-05-01T10:00:00.008Z\tINFO\tP2PNetwork\tstarting",
    "2024-05-01T10:00:00.009Z\tINFO\tP2PNetwork\tservices configured\t{\"selfPeer\":\"16Uiu2HAmQ8ZXvLy9TkMx\"}",
    "2024-05-01T10:00:00.010Z\tINFO\tDutyScheduler\tduty scheduler started",
];

/// High-frequency events flagged as spam, each with a valid payload.
pub const CORPUS_SPAM: &[&str] = &[
    "2024-05-01T10:00:01Z\tINFO\tP2PNetwork.ConnHandler\tVerified handshake nodeinfo\t{\"conn_dir\":\"outbound\",\"remote_addr\":\"/ip4/1.2.3.4/tcp/13001\",\"peer_id\":\"16Uiu2HAmQ8ZXvLy9TkMx\"}",
    "2024-05-01T10:00:01Z\tINFO\tP2PNetwork\tproposed discovered peers\t{\"count\":4}",
    "2024-05-01T10:00:01Z\tINFO\texecution_client\tfetched registry events\t{\"events\":10,\"progress\":\"5%\"}",
    "2024-05-01T10:00:01Z\tINFO\tDutyScheduler\t🔁 indices change received\t{\"handler\":\"ATTESTER\"}",
    "2024-05-01T10:00:01Z\tINFO\tconsensus_client\tblock root to slot cache updated\t{\"block_root\":\"0xabc\"}",
    "2024-05-01T10:00:01Z\tINFO\tconsensus_client\tevent broadcasted\t{\"topic\":\"head\",\"subscriber_identifier\":\"ssv\"}",
    "2024-05-01T10:00:01Z\tINFO\tOperator.DutyScheduler\t🔁 indices change received\t{\"handler\":\"PROPOSER\"}",
];

/// Lines that are not node records at all.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "   ",
    "single-field",
    "May 01 10:00:00 node-1 systemd[1]: Started ssv.service.\tINFO",
    "2024-05-01T10:00:00Z systemd[1]\tINFO\tStopping",
];

/// Generate `n` lines cycling through the start-up corpus, spam corpus and
/// unmatched records, for throughput tests.
pub fn corpus_mixed(n: usize) -> Vec<String> {
    let unmatched = [
        "2024-05-01T10:00:02Z\tWARN\tSomethingNew\tnot yet handled\t{\"a\":1}",
        "2024-05-01T10:00:02Z\tERROR\tConsensusClient\tunknown event\t{\"error\":\"boom\"}",
    ];
    CORPUS_STARTUP
        .iter()
        .chain(CORPUS_SPAM)
        .chain(unmatched.iter())
        .cycle()
        .take(n)
        .map(|line| line.to_string())
        .collect()
}
