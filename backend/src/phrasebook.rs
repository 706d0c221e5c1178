//! Bilingual phrase tables, English on the left. Reverse directions are
//! derived by the translator.

pub(crate) struct Phrasebook {
    pub phrases: &'static [(&'static str, &'static str)],
    pub words: &'static [(&'static str, &'static str)],
    /// Sentence openers translated as a unit; the remainder is looked up on its own.
    pub idioms: &'static [(&'static str, &'static str)],
}

pub(crate) const ENGLISH_SPANISH: Phrasebook = Phrasebook {
    phrases: &[
        ("hello", "hola"),
        ("good morning", "buenos días"),
        ("good afternoon", "buenas tardes"),
        ("good evening", "buenas noches"),
        ("good night", "buenas noches"),
        ("goodbye", "adiós"),
        ("see you later", "hasta luego"),
        ("thank you", "gracias"),
        ("thank you very much", "muchas gracias"),
        ("you're welcome", "de nada"),
        ("excuse me", "disculpe"),
        ("i'm sorry", "lo siento"),
        ("how are you?", "¿cómo está?"),
        ("i'm fine", "estoy bien"),
        ("what is your name?", "¿cómo se llama?"),
        ("my name is", "me llamo"),
        ("do you speak english?", "¿habla inglés?"),
        ("i don't understand", "no entiendo"),
        ("i don't speak spanish", "no hablo español"),
        ("can you help me?", "¿puede ayudarme?"),
        ("where is the bathroom?", "¿dónde está el baño?"),
        ("how much does it cost?", "¿cuánto cuesta?"),
        ("the check, please", "la cuenta, por favor"),
        ("a table for two", "una mesa para dos"),
        ("water, please", "agua, por favor"),
        ("the menu, please", "la carta, por favor"),
        ("pilgrim menu", "menú del peregrino"),
        ("i am a pilgrim", "soy peregrino"),
        ("i am vegetarian", "soy vegetariano"),
        ("where is the albergue?", "¿dónde está el albergue?"),
        ("is there a bed available?", "¿hay una cama disponible?"),
        ("i have a reservation", "tengo una reserva"),
        ("what time is breakfast?", "¿a qué hora es el desayuno?"),
        ("where is the pilgrim office?", "¿dónde está la oficina del peregrino?"),
        ("where can i get a stamp?", "¿dónde puedo sellar la credencial?"),
        ("i need a doctor", "necesito un médico"),
        ("call an ambulance", "llame a una ambulancia"),
        ("where is the pharmacy?", "¿dónde está la farmacia?"),
        ("my feet hurt", "me duelen los pies"),
        ("i have a blister", "tengo una ampolla"),
        ("how far is it?", "¿a qué distancia está?"),
        ("which way to santiago?", "¿por dónde se va a santiago?"),
        ("is this the camino?", "¿es este el camino?"),
        ("i am lost", "estoy perdido"),
        ("good luck", "buena suerte"),
        ("cheers", "salud"),
    ],
    words: &[
        ("i", "yo"),
        ("you", "tú"),
        ("we", "nosotros"),
        ("my", "mi"),
        ("the", "el"),
        ("a", "un"),
        ("and", "y"),
        ("or", "o"),
        ("with", "con"),
        ("without", "sin"),
        ("for", "para"),
        ("water", "agua"),
        ("bread", "pan"),
        ("wine", "vino"),
        ("beer", "cerveza"),
        ("coffee", "café"),
        ("milk", "leche"),
        ("tea", "té"),
        ("food", "comida"),
        ("breakfast", "desayuno"),
        ("lunch", "almuerzo"),
        ("dinner", "cena"),
        ("bed", "cama"),
        ("room", "habitación"),
        ("bathroom", "baño"),
        ("shower", "ducha"),
        ("towel", "toalla"),
        ("key", "llave"),
        ("hotel", "hotel"),
        ("hostel", "albergue"),
        ("pilgrim", "peregrino"),
        ("church", "iglesia"),
        ("cathedral", "catedral"),
        ("bridge", "puente"),
        ("river", "río"),
        ("road", "carretera"),
        ("path", "sendero"),
        ("way", "camino"),
        ("village", "pueblo"),
        ("city", "ciudad"),
        ("mountain", "montaña"),
        ("hill", "colina"),
        ("left", "izquierda"),
        ("right", "derecha"),
        ("straight", "recto"),
        ("near", "cerca"),
        ("far", "lejos"),
        ("here", "aquí"),
        ("there", "allí"),
        ("today", "hoy"),
        ("tomorrow", "mañana"),
        ("yesterday", "ayer"),
        ("night", "noche"),
        ("day", "día"),
        ("week", "semana"),
        ("rain", "lluvia"),
        ("sun", "sol"),
        ("hot", "caliente"),
        ("cold", "frío"),
        ("wind", "viento"),
        ("doctor", "médico"),
        ("pharmacy", "farmacia"),
        ("hospital", "hospital"),
        ("police", "policía"),
        ("help", "ayuda"),
        ("money", "dinero"),
        ("ticket", "billete"),
        ("bus", "autobús"),
        ("train", "tren"),
        ("taxi", "taxi"),
        ("station", "estación"),
        ("shop", "tienda"),
        ("market", "mercado"),
        ("restaurant", "restaurante"),
        ("open", "abierto"),
        ("closed", "cerrado"),
        ("good", "bueno"),
        ("bad", "malo"),
        ("big", "grande"),
        ("small", "pequeño"),
        ("tired", "cansado"),
        ("hungry", "hambriento"),
        ("feet", "pies"),
        ("backpack", "mochila"),
        ("boots", "botas"),
        ("stamp", "sello"),
        ("credential", "credencial"),
        ("map", "mapa"),
        ("one", "uno"),
        ("two", "dos"),
        ("three", "tres"),
        ("four", "cuatro"),
        ("five", "cinco"),
        ("ten", "diez"),
        ("kilometres", "kilómetros"),
        ("where", "dónde"),
        ("when", "cuándo"),
        ("what", "qué"),
        ("who", "quién"),
        ("very", "muy"),
        ("friend", "amigo"),
        ("thanks", "gracias"),
        ("yes", "sí"),
        ("no", "no"),
        ("please", "por favor"),
        ("sorry", "perdón"),
        ("is", "es"),
        ("eat", "comer"),
        ("drink", "beber"),
        ("sleep", "dormir"),
        ("walk", "caminar"),
    ],
    idioms: &[
        ("where is", "dónde está"),
        ("how much is", "cuánto cuesta"),
        ("i would like", "me gustaría"),
        ("i am looking for", "busco"),
        ("i need", "necesito"),
        ("do you have", "tiene"),
        ("is there", "hay"),
    ],
};

pub(crate) const ENGLISH_FRENCH: Phrasebook = Phrasebook {
    phrases: &[
        ("hello", "bonjour"),
        ("good evening", "bonsoir"),
        ("goodbye", "au revoir"),
        ("thank you", "merci"),
        ("thank you very much", "merci beaucoup"),
        ("you're welcome", "de rien"),
        ("excuse me", "excusez-moi"),
        ("i'm sorry", "je suis désolé"),
        ("how are you?", "comment allez-vous ?"),
        ("do you speak english?", "parlez-vous anglais ?"),
        ("i don't understand", "je ne comprends pas"),
        ("where is the bathroom?", "où sont les toilettes ?"),
        ("how much does it cost?", "combien ça coûte ?"),
        ("the check, please", "l'addition, s'il vous plaît"),
        ("i am a pilgrim", "je suis pèlerin"),
        ("is there a bed available?", "y a-t-il un lit disponible ?"),
        ("i have a reservation", "j'ai une réservation"),
        ("i need a doctor", "j'ai besoin d'un médecin"),
        ("where is the pharmacy?", "où est la pharmacie ?"),
        ("my feet hurt", "j'ai mal aux pieds"),
        ("i am lost", "je suis perdu"),
        ("good luck", "bonne chance"),
    ],
    words: &[
        ("i", "je"),
        ("the", "le"),
        ("a", "un"),
        ("and", "et"),
        ("with", "avec"),
        ("my", "mon"),
        ("water", "eau"),
        ("bread", "pain"),
        ("wine", "vin"),
        ("beer", "bière"),
        ("coffee", "café"),
        ("milk", "lait"),
        ("food", "nourriture"),
        ("breakfast", "petit-déjeuner"),
        ("dinner", "dîner"),
        ("bed", "lit"),
        ("room", "chambre"),
        ("shower", "douche"),
        ("pilgrim", "pèlerin"),
        ("church", "église"),
        ("cathedral", "cathédrale"),
        ("bridge", "pont"),
        ("river", "rivière"),
        ("way", "chemin"),
        ("path", "sentier"),
        ("village", "village"),
        ("city", "ville"),
        ("mountain", "montagne"),
        ("left", "gauche"),
        ("right", "droite"),
        ("near", "près"),
        ("far", "loin"),
        ("here", "ici"),
        ("today", "aujourd'hui"),
        ("tomorrow", "demain"),
        ("night", "nuit"),
        ("day", "jour"),
        ("rain", "pluie"),
        ("sun", "soleil"),
        ("cold", "froid"),
        ("hot", "chaud"),
        ("doctor", "médecin"),
        ("pharmacy", "pharmacie"),
        ("help", "aide"),
        ("money", "argent"),
        ("train", "train"),
        ("station", "gare"),
        ("shop", "magasin"),
        ("restaurant", "restaurant"),
        ("open", "ouvert"),
        ("closed", "fermé"),
        ("good", "bon"),
        ("tired", "fatigué"),
        ("feet", "pieds"),
        ("backpack", "sac à dos"),
        ("stamp", "tampon"),
        ("map", "carte"),
        ("where", "où"),
        ("friend", "ami"),
        ("very", "très"),
        ("yes", "oui"),
        ("no", "non"),
        ("please", "s'il vous plaît"),
    ],
    idioms: &[
        ("where is", "où est"),
        ("how much is", "combien coûte"),
        ("i would like", "je voudrais"),
        ("i need", "j'ai besoin de"),
        ("do you have", "avez-vous"),
    ],
};

pub(crate) const ENGLISH_PORTUGUESE: Phrasebook = Phrasebook {
    phrases: &[
        ("hello", "olá"),
        ("good morning", "bom dia"),
        ("good evening", "boa noite"),
        ("goodbye", "adeus"),
        ("thank you", "obrigado"),
        ("you're welcome", "de nada"),
        ("excuse me", "com licença"),
        ("i'm sorry", "desculpe"),
        ("do you speak english?", "fala inglês?"),
        ("i don't understand", "não entendo"),
        ("where is the bathroom?", "onde fica a casa de banho?"),
        ("how much does it cost?", "quanto custa?"),
        ("the check, please", "a conta, por favor"),
        ("i am a pilgrim", "sou peregrino"),
        ("i need a doctor", "preciso de um médico"),
        ("my feet hurt", "os meus pés doem"),
        ("good luck", "boa sorte"),
    ],
    words: &[
        ("the", "o"),
        ("a", "um"),
        ("and", "e"),
        ("with", "com"),
        ("my", "meu"),
        ("water", "água"),
        ("bread", "pão"),
        ("wine", "vinho"),
        ("beer", "cerveja"),
        ("coffee", "café"),
        ("milk", "leite"),
        ("food", "comida"),
        ("breakfast", "pequeno-almoço"),
        ("dinner", "jantar"),
        ("bed", "cama"),
        ("room", "quarto"),
        ("shower", "duche"),
        ("pilgrim", "peregrino"),
        ("church", "igreja"),
        ("cathedral", "catedral"),
        ("bridge", "ponte"),
        ("river", "rio"),
        ("way", "caminho"),
        ("village", "aldeia"),
        ("city", "cidade"),
        ("left", "esquerda"),
        ("right", "direita"),
        ("near", "perto"),
        ("far", "longe"),
        ("here", "aqui"),
        ("today", "hoje"),
        ("tomorrow", "amanhã"),
        ("night", "noite"),
        ("day", "dia"),
        ("rain", "chuva"),
        ("sun", "sol"),
        ("doctor", "médico"),
        ("pharmacy", "farmácia"),
        ("help", "ajuda"),
        ("money", "dinheiro"),
        ("train", "comboio"),
        ("station", "estação"),
        ("shop", "loja"),
        ("open", "aberto"),
        ("closed", "fechado"),
        ("good", "bom"),
        ("tired", "cansado"),
        ("feet", "pés"),
        ("backpack", "mochila"),
        ("where", "onde"),
        ("friend", "amigo"),
        ("yes", "sim"),
        ("no", "não"),
        ("please", "por favor"),
    ],
    idioms: &[
        ("where is", "onde está"),
        ("how much is", "quanto custa"),
        ("i would like", "eu gostaria"),
        ("i need", "preciso de"),
        ("do you have", "tem"),
    ],
};
