//! Network presets: node URLs, named token contracts and transaction
//! defaults.

use serde::{Deserialize, Serialize};
use zeepin_script::Address;
use zeepin_transaction::Fixed64;

use crate::ClientError;

/// Test network node host.
pub const TEST_NODE: &str = "192.168.199.244";
/// REST port.
pub const HTTP_REST_PORT: u16 = 20334;
/// WebSocket port.
pub const HTTP_WS_PORT: u16 = 20335;
/// JSON-RPC port.
pub const HTTP_RPC_PORT: u16 = 20336;

/// Payer used for read-only pre-executed queries.
pub const DEFAULT_PAYER: &str = "ZTMpJFXdmgosonQn5KVy3fi8YmBkztAs4Q";
/// Gas price used when the caller does not give one.
pub const DEFAULT_GAS_PRICE: u64 = 1;
/// Gas limit used when the caller does not give one.
pub const DEFAULT_GAS_LIMIT: u64 = 20000;

/// Token contracts deployed on the test network, by name.
pub const CONTRACTS_TEST: [(&str, &str); 8] = [
    ("zusd", "c110eea4f6ca75ca9275b064b9c3b446087c6d43"),
    ("glore", "0f27a43a74c963e07c0b633aff49ebb269e6d727"),
    ("beryl", "120e3eb603d68cfca406b7d51362586e38c9f4f4"),
    ("sapphire", "bbc4773cf57b94c466d82781359b7d55000b3e9d"),
    ("gold", "e5c0c001a4a76dfa1ceae2ded6fd634c3a2ff572"),
    ("amber", "66660350c444626e85021c9a12e8291409d6a021"),
    ("jasper", "5a5b236556d6afc003e364f3aaa4c0f624955179"),
    ("charoite", "fe1522fcf65b91dfdce8b9f62a54c8bde94aa959"),
];

/// Token contracts deployed on the main network, by name.
pub const CONTRACTS_MAIN: [(&str, &str); 8] = [
    ("zusd", "c1d9f156c4f32f79e6864270a77688880447b179"),
    ("glore", "2fc27e33f043a3cc71746ce598abb6ca4b87c713"),
    ("beryl", "0cad69475cad88fd928e1d00feadfd330149bb4f"),
    ("sapphire", "d7b3693c21b1e3dec389075b0a8ba80344c1906f"),
    ("gold", "45b5856bd286a83682c60b5cbad55e7895771212"),
    ("amber", "226d6170e6ed4b22ddc8b091bf6b4cc7bed96aff"),
    ("jasper", "c5985df728d4a85166243cdd44d8e522f78eb00c"),
    ("charoite", "cb29ef66434439dc55ccf01e2ce52aec3628def9"),
];

/// A named token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// Token name, e.g. `zusd`.
    pub name: String,
    /// Contract hash as 40 hex characters.
    #[serde(rename = "contractAddr")]
    pub contract_addr: String,
}

/// Everything a host needs to talk to one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// REST endpoint base, e.g. `http://host:20334`.
    pub rest_url: String,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// WebSocket endpoint.
    pub socket_url: String,
    /// Named token contracts.
    pub contracts: Vec<ContractEntry>,
    /// Default gas price.
    pub gas_price: Fixed64,
    /// Default gas limit.
    pub gas_limit: Fixed64,
    /// Payer for pre-executed queries.
    pub default_payer: Address,
}

impl NetworkConfig {
    /// Configuration for a node at `host` with the given contract table.
    pub fn for_node(host: &str, contracts: &[(&str, &str)]) -> Result<Self, ClientError> {
        Ok(NetworkConfig {
            rest_url: format!("http://{}:{}", host, HTTP_REST_PORT),
            rpc_url: format!("http://{}:{}", host, HTTP_RPC_PORT),
            socket_url: format!("ws://{}:{}", host, HTTP_WS_PORT),
            contracts: contracts
                .iter()
                .map(|(name, addr)| ContractEntry {
                    name: name.to_string(),
                    contract_addr: addr.to_string(),
                })
                .collect(),
            gas_price: Fixed64::new(DEFAULT_GAS_PRICE),
            gas_limit: Fixed64::new(DEFAULT_GAS_LIMIT),
            default_payer: Address::from_base58(DEFAULT_PAYER)?,
        })
    }

    /// Test network preset.
    pub fn testnet() -> Result<Self, ClientError> {
        Self::for_node(TEST_NODE, &CONTRACTS_TEST)
    }

    /// Main network preset. The main network has no fixed public node, so
    /// the host is supplied by the caller.
    pub fn mainnet(host: &str) -> Result<Self, ClientError> {
        Self::for_node(host, &CONTRACTS_MAIN)
    }

    /// Look up a token contract by name.
    pub fn contract_address(&self, name: &str) -> Result<Address, ClientError> {
        let entry = self
            .contracts
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ClientError::UnknownContract(name.to_string()))?;
        Ok(Address::from_hex(&entry.contract_addr)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testnet_preset() {
        let config = NetworkConfig::testnet().unwrap();
        assert_eq!(config.rest_url, "http://192.168.199.244:20334");
        assert_eq!(config.rpc_url, "http://192.168.199.244:20336");
        assert_eq!(config.socket_url, "ws://192.168.199.244:20335");
        assert_eq!(config.default_payer.to_base58(), DEFAULT_PAYER);
        assert_eq!(config.gas_limit.value(), 20000);
        assert_eq!(
            config.contract_address("zusd").unwrap().serialize(),
            "c110eea4f6ca75ca9275b064b9c3b446087c6d43"
        );
    }

    #[test]
    fn test_mainnet_contracts_differ() {
        let config = NetworkConfig::mainnet("10.0.0.1").unwrap();
        assert_eq!(config.rest_url, "http://10.0.0.1:20334");
        assert_eq!(
            config.contract_address("charoite").unwrap().serialize(),
            "cb29ef66434439dc55ccf01e2ce52aec3628def9"
        );
        assert!(matches!(
            config.contract_address("ont"),
            Err(ClientError::UnknownContract(_))
        ));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = NetworkConfig::testnet().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"contractAddr\":\"c110eea4f6ca75ca9275b064b9c3b446087c6d43\""));
        let back: NetworkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
